use crate::{
    domain::ticket::{Ticket, TicketId},
    error::Result,
};
use async_trait::async_trait;

pub mod sqlite;

/// Repository over the ticket store.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// All tickets, ordered by status ascending then creation time
    /// descending, so each column's newest items come first.
    async fn list_all(&self) -> Result<Vec<Ticket>>;

    /// Looks up a ticket by id.
    async fn get_by_id(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Inserts a ticket and returns it with the store-assigned id. Any id
    /// on the input is ignored.
    async fn insert(&self, ticket: Ticket) -> Result<Ticket>;

    /// Replaces a ticket's mutable fields. Returns `None` if the id is
    /// unknown. The stored creation time is preserved regardless of the
    /// value carried by the replacement.
    async fn replace(&self, ticket: Ticket) -> Result<Option<Ticket>>;

    /// Deletes by id; `true` if a row was removed.
    async fn remove(&self, id: TicketId) -> Result<bool>;

    /// Whether a ticket with the id exists.
    async fn exists(&self, id: TicketId) -> Result<bool>;
}
