//! # ProjectBoard
//!
//! Kanban-style ticket board: a REST backend that persists tickets to
//! SQLite, and the board view-model implementing the optimistic
//! drag-and-drop status-transition protocol against that API.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use app::App;
pub use client::{ApiClient, ClientError};
pub use config::Config;
pub use domain::{
    board::{Board, CategoryFilter, PendingMove},
    form::{SaveAction, TicketForm},
    ticket::{Ticket, TicketCategory, TicketId, TicketStatus},
};
pub use error::{BoardError, Result};
pub use service::TicketService;
pub use storage::TicketRepository;
