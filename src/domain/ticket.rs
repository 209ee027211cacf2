use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BoardError;

/// Store-assigned ticket identifier. Zero means "not yet persisted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(i64);

impl TicketId {
    pub const UNASSIGNED: TicketId = TicketId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket category. Serializes as the variant name ("Feature", "Bug", "RAndD").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketCategory {
    Feature,
    Bug,
    RAndD,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 3] = [Self::Feature, Self::Bug, Self::RAndD];

    /// Integer code used in the store.
    pub fn code(self) -> i64 {
        match self {
            Self::Feature => 0,
            Self::Bug => 1,
            Self::RAndD => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, BoardError> {
        match code {
            0 => Ok(Self::Feature),
            1 => Ok(Self::Bug),
            2 => Ok(Self::RAndD),
            other => Err(BoardError::InvalidCategoryCode(other)),
        }
    }

    /// Human-readable label for the UI.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Bug => "Bug",
            Self::RAndD => "R&D",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Status of a ticket on the board. Serializes as the variant name.
///
/// The integer codes follow workflow order so the store can sort columns
/// with a plain `ORDER BY status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Backlog,
    InProgress,
    Review,
    Done,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [Self::Backlog, Self::InProgress, Self::Review, Self::Done];

    /// Integer code used in the store; doubles as the board column index.
    pub fn code(self) -> i64 {
        match self {
            Self::Backlog => 0,
            Self::InProgress => 1,
            Self::Review => 2,
            Self::Done => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, BoardError> {
        match code {
            0 => Ok(Self::Backlog),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Review),
            3 => Ok(Self::Done),
            other => Err(BoardError::InvalidStatusCode(other)),
        }
    }

    pub fn column_index(self) -> usize {
        self.code() as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A board ticket. `created_at` is set once at creation and preserved by
/// every update, including full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub description: Option<String>,
    pub category: TicketCategory,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates an unpersisted ticket stamped with the current time.
    pub fn new(name: String, category: TicketCategory, status: TicketStatus) -> Self {
        Self {
            id: TicketId::UNASSIGNED,
            name,
            description: None,
            category,
            status,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
