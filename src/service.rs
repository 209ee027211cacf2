use std::sync::Arc;

use chrono::Utc;

use crate::{
    api::dto::{CreateTicket, UpdateTicket},
    domain::ticket::{Ticket, TicketId, TicketStatus},
    error::{BoardError, Result},
    storage::TicketRepository,
};

/// Orchestration over the repository. Owns creation-timestamp stamping and
/// the partial-update semantics; introduces no storage of its own.
pub struct TicketService {
    repository: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Ticket>> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: TicketId) -> Result<Ticket> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BoardError::TicketNotFound(id))
    }

    /// Creates a ticket from validated input, stamping the creation time.
    pub async fn create(&self, input: CreateTicket) -> Result<Ticket> {
        let ticket = Ticket {
            id: TicketId::UNASSIGNED,
            name: input.name,
            description: input.description,
            category: input.category,
            status: input.status,
            created_at: Utc::now(),
        };
        self.repository.insert(ticket).await
    }

    /// Replaces every mutable field of an existing ticket. The stored
    /// creation time is preserved by the repository.
    pub async fn full_update(&self, id: TicketId, input: UpdateTicket) -> Result<Ticket> {
        if !self.repository.exists(id).await? {
            return Err(BoardError::TicketNotFound(id));
        }

        let replacement = Ticket {
            id,
            name: input.name,
            description: input.description,
            category: input.category,
            status: input.status,
            created_at: Utc::now(), // ignored by replace
        };
        self.repository
            .replace(replacement)
            .await?
            .ok_or(BoardError::TicketNotFound(id))
    }

    /// Status-only patch, the operation behind drag-and-drop.
    pub async fn patch_status(&self, id: TicketId, status: TicketStatus) -> Result<Ticket> {
        let mut existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(BoardError::TicketNotFound(id))?;

        existing.status = status;
        self.repository
            .replace(existing)
            .await?
            .ok_or(BoardError::TicketNotFound(id))
    }

    /// Deletes by id; `false` when nothing existed (never an error).
    pub async fn delete(&self, id: TicketId) -> Result<bool> {
        self.repository.remove(id).await
    }
}
