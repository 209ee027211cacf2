use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::client::ApiClient;
use crate::domain::board::Board;
use crate::domain::form::SaveAction;
use crate::domain::ticket::{TicketId, TicketStatus};

/// How long a drag-and-drop failure message stays on screen.
pub const MOVE_ERROR_CLEAR_AFTER: Duration = Duration::from_secs(3);

/// Drives the board view-model over the API client: load, save, delete and
/// the optimistic drag-and-drop protocol.
#[derive(Clone)]
pub struct App {
    pub board: Arc<Mutex<Board>>,
    api: ApiClient,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::new())),
            api,
        }
    }

    /// Reloads the full ticket set from the backend.
    pub async fn load(&self) {
        {
            let mut board = self.board.lock().await;
            board.is_loading = true;
            board.clear_error();
        }

        let result = self.api.list_tickets().await;
        let mut board = self.board.lock().await;
        match result {
            Ok(tickets) => board.set_tickets(tickets),
            Err(err) => board.set_error(format!("Failed to load tickets: {err}")),
        }
        board.is_loading = false;
    }

    /// Create or update, then reload and close the editor.
    pub async fn save(&self, action: SaveAction) {
        let result = match &action {
            SaveAction::Create(create) => self.api.create_ticket(create).await.map(|_| ()),
            SaveAction::Update { id, ticket } => {
                self.api.update_ticket(*id, ticket).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => {
                self.load().await;
                self.board.lock().await.clear_selection();
            }
            Err(err) => {
                let message = match action {
                    SaveAction::Create(_) => format!("Failed to create ticket: {err}"),
                    SaveAction::Update { .. } => format!("Failed to update ticket: {err}"),
                };
                self.board.lock().await.set_error(message);
            }
        }
    }

    pub async fn delete(&self, id: TicketId) {
        match self.api.delete_ticket(id).await {
            Ok(()) => {
                self.load().await;
                self.board.lock().await.clear_selection();
            }
            Err(_) => {
                self.board
                    .lock()
                    .await
                    .set_error("Failed to delete ticket. Please try again.");
            }
        }
    }

    /// Handles a card drop. Same column: local reorder only. Different
    /// column: optimistic move, then status patch; confirmed with the
    /// server ticket or rolled back with a transient error message.
    pub async fn move_ticket(
        &self,
        from_status: TicketStatus,
        from_index: usize,
        to_status: TicketStatus,
        to_index: usize,
    ) {
        if from_status == to_status {
            self.board
                .lock()
                .await
                .reorder(from_status, from_index, to_index);
            return;
        }

        let Some(pending) = self
            .board
            .lock()
            .await
            .begin_move(from_status, from_index, to_status, to_index)
        else {
            return;
        };

        match self
            .api
            .update_ticket_status(pending.ticket_id, to_status)
            .await
        {
            Ok(server_ticket) => {
                self.board.lock().await.confirm_move(pending, server_ticket);
            }
            Err(err) => {
                let message = format!("Failed to move ticket: {err}");
                self.board.lock().await.rollback_move(pending, &message);

                // The message clears itself unless a newer error replaced it.
                let board = Arc::clone(&self.board);
                tokio::spawn(async move {
                    tokio::time::sleep(MOVE_ERROR_CLEAR_AFTER).await;
                    board.lock().await.clear_error_if(&message);
                });
            }
        }
    }
}
