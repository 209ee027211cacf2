use std::collections::HashSet;

use crate::domain::ticket::{Ticket, TicketCategory, TicketId, TicketStatus};

/// Category filter applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TicketCategory),
}

impl CategoryFilter {
    fn admits(self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => ticket.category == category,
        }
    }
}

/// Token for a cross-column move awaiting backend confirmation.
///
/// Captures everything needed to either accept the server's ticket or put
/// the card back where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending move must be confirmed or rolled back"]
pub struct PendingMove {
    pub ticket_id: TicketId,
    pub old_status: TicketStatus,
    pub new_status: TicketStatus,
    pub old_index: usize,
}

/// Board view-model: the full ticket set, the active category filter and the
/// four status-partitioned column lists.
///
/// The columns are always a partition of the filtered view of `all_tickets`,
/// except while a cross-column move is in flight (between [`Board::begin_move`]
/// and its confirm/rollback).
#[derive(Debug, Default)]
pub struct Board {
    all_tickets: Vec<Ticket>,
    columns: [Vec<Ticket>; 4],
    filter: CategoryFilter,
    pub is_loading: bool,
    error_message: Option<String>,
    selected: Option<Ticket>,
    pending: HashSet<TicketId>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full ticket set (after a load) and recomputes the columns.
    pub fn set_tickets(&mut self, tickets: Vec<Ticket>) {
        self.all_tickets = tickets;
        self.apply_filter();
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.all_tickets
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.apply_filter();
    }

    /// Recomputes the four column lists from `all_tickets` and the active
    /// filter. Pure and synchronous; never touches the network.
    pub fn apply_filter(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
        for ticket in &self.all_tickets {
            if self.filter.admits(ticket) {
                self.columns[ticket.status.column_index()].push(ticket.clone());
            }
        }
    }

    pub fn column(&self, status: TicketStatus) -> &[Ticket] {
        &self.columns[status.column_index()]
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clears the error only if it is still the given message, so a newer,
    /// unrelated error is not clobbered by a stale timer.
    pub fn clear_error_if(&mut self, message: &str) {
        if self.error_message.as_deref() == Some(message) {
            self.error_message = None;
        }
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn selected(&self) -> Option<&Ticket> {
        self.selected.as_ref()
    }

    pub fn select_ticket(&mut self, ticket: Ticket) {
        self.selected = Some(ticket);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn has_pending_move(&self, id: TicketId) -> bool {
        self.pending.contains(&id)
    }

    /// Same-column drop: repositions the card within one list. No status
    /// change, no backend call.
    pub fn reorder(&mut self, status: TicketStatus, from_index: usize, to_index: usize) {
        let column = &mut self.columns[status.column_index()];
        if from_index >= column.len() {
            return;
        }
        let ticket = column.remove(from_index);
        let to_index = to_index.min(column.len());
        column.insert(to_index, ticket);
    }

    /// Cross-column drop: optimistically moves the card and flips its local
    /// status before any network confirmation.
    ///
    /// Returns `None` when the drop cannot start: the source index is stale,
    /// or the ticket already has a move in flight (a second drag of a pending
    /// card is refused rather than raced).
    pub fn begin_move(
        &mut self,
        from_status: TicketStatus,
        from_index: usize,
        to_status: TicketStatus,
        to_index: usize,
    ) -> Option<PendingMove> {
        if from_status == to_status {
            return None;
        }
        let source = &self.columns[from_status.column_index()];
        let ticket_id = source.get(from_index)?.id;
        if self.pending.contains(&ticket_id) {
            return None;
        }

        let mut ticket = self.columns[from_status.column_index()].remove(from_index);
        ticket.status = to_status;
        self.set_local_status(ticket_id, to_status);

        let dest = &mut self.columns[to_status.column_index()];
        let to_index = to_index.min(dest.len());
        dest.insert(to_index, ticket);

        self.pending.insert(ticket_id);
        Some(PendingMove {
            ticket_id,
            old_status: from_status,
            new_status: to_status,
            old_index: from_index,
        })
    }

    /// Backend confirmed the move: the server-returned ticket replaces the
    /// local copy at its current position in the destination column.
    pub fn confirm_move(&mut self, pending: PendingMove, server_ticket: Ticket) {
        self.pending.remove(&pending.ticket_id);

        let dest = &mut self.columns[pending.new_status.column_index()];
        if let Some(pos) = dest.iter().position(|t| t.id == pending.ticket_id) {
            dest[pos] = server_ticket.clone();
        }
        if let Some(entry) = self
            .all_tickets
            .iter_mut()
            .find(|t| t.id == pending.ticket_id)
        {
            *entry = server_ticket;
        }
    }

    /// Backend rejected the move: revert the local status and put the card
    /// back at its original index in the source column.
    ///
    /// Best-effort: if the card is no longer in the destination column (a
    /// concurrent reload replaced the lists), the list surgery is skipped
    /// rather than corrupting unrelated state. The error message is set
    /// either way.
    pub fn rollback_move(&mut self, pending: PendingMove, message: impl Into<String>) {
        self.pending.remove(&pending.ticket_id);
        self.set_local_status(pending.ticket_id, pending.old_status);

        let dest = &mut self.columns[pending.new_status.column_index()];
        if let Some(pos) = dest.iter().position(|t| t.id == pending.ticket_id) {
            let mut ticket = dest.remove(pos);
            ticket.status = pending.old_status;
            let source = &mut self.columns[pending.old_status.column_index()];
            let index = pending.old_index.min(source.len());
            source.insert(index, ticket);
        }

        self.error_message = Some(message.into());
    }

    fn set_local_status(&mut self, id: TicketId, status: TicketStatus) {
        if let Some(entry) = self.all_tickets.iter_mut().find(|t| t.id == id) {
            entry.status = status;
        }
    }
}
