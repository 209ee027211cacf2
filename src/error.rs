use thiserror::Error;

use crate::domain::ticket::TicketId;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Ticket with ID {0} not found")]
    TicketNotFound(TicketId),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(i64),

    #[error("Invalid category code: {0}")]
    InvalidCategoryCode(i64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for BoardError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
