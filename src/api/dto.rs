use serde::{Deserialize, Serialize};

use crate::domain::ticket::{TicketCategory, TicketStatus};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: TicketCategory,
    pub status: TicketStatus,
}

/// Body of `PUT /api/tickets/{id}`. Same shape as create; carries no
/// `createdAt`, which the store preserves on replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: TicketCategory,
    pub status: TicketStatus,
}

/// Body of `PATCH /api/tickets/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: TicketStatus,
}

/// Error body returned by every failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Field validation shared by create and update. Category and status are
/// already guaranteed valid by enum deserialization.
pub fn validate_ticket_fields(name: &str, description: Option<&str>) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Ticket name cannot be empty or whitespace".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("Name cannot exceed {MAX_NAME_LEN} characters"));
    }
    if let Some(description) = description {
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(format!(
                "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
            ));
        }
    }
    Ok(())
}

impl CreateTicket {
    pub fn validate(&self) -> Result<(), String> {
        validate_ticket_fields(&self.name, self.description.as_deref())
    }
}

impl UpdateTicket {
    pub fn validate(&self) -> Result<(), String> {
        validate_ticket_fields(&self.name, self.description.as_deref())
    }
}
