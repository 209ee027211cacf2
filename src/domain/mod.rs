pub mod board;
pub mod form;
pub mod ticket;

pub use board::{Board, CategoryFilter, PendingMove};
pub use form::{SaveAction, TicketForm};
pub use ticket::{Ticket, TicketCategory, TicketId, TicketStatus};
