use crate::api::dto::{CreateTicket, UpdateTicket, MAX_NAME_LEN};
use crate::domain::ticket::{Ticket, TicketCategory, TicketId, TicketStatus};

/// Payload emitted by a validated form save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    Create(CreateTicket),
    Update { id: TicketId, ticket: UpdateTicket },
}

/// Create/edit form state. Edit mode when built from an existing ticket.
#[derive(Debug, Clone)]
pub struct TicketForm {
    pub name: String,
    pub description: String,
    pub category: TicketCategory,
    pub status: TicketStatus,
    editing: Option<TicketId>,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: TicketCategory::Feature,
            status: TicketStatus::Backlog,
            editing: None,
        }
    }
}

impl TicketForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form from an existing ticket, switching to edit mode.
    pub fn for_ticket(ticket: &Ticket) -> Self {
        Self {
            name: ticket.name.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            category: ticket.category,
            status: ticket.status,
            editing: Some(ticket.id),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    /// Local-only validation: name required and within the length limit.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if name.len() > MAX_NAME_LEN {
            return Err(format!("Name cannot exceed {MAX_NAME_LEN} characters"));
        }
        Ok(())
    }

    /// Validates and emits the save payload. Name and description are
    /// trimmed; an empty description becomes absent rather than "".
    pub fn save_action(&self) -> Result<SaveAction, String> {
        self.validate()?;

        let name = self.name.trim().to_string();
        let description = match self.description.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };

        Ok(match self.editing {
            Some(id) => SaveAction::Update {
                id,
                ticket: UpdateTicket {
                    name,
                    description,
                    category: self.category,
                    status: self.status,
                },
            },
            None => SaveAction::Create(CreateTicket {
                name,
                description,
                category: self.category,
                status: self.status,
            }),
        })
    }

    /// Delete is only emitted for an existing ticket and after the user
    /// confirmed.
    pub fn delete_action(&self, confirmed: bool) -> Option<TicketId> {
        if confirmed {
            self.editing
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        let mut t = Ticket::new(
            "Fix login".to_string(),
            TicketCategory::Bug,
            TicketStatus::InProgress,
        );
        t.id = TicketId::new(3);
        t.description = Some("repro steps".to_string());
        t
    }

    #[test]
    fn test_empty_form_fails_validation() {
        let form = TicketForm::new();
        assert_eq!(form.validate(), Err("Name is required".to_string()));
        assert!(form.save_action().is_err());
    }

    #[test]
    fn test_whitespace_name_fails_validation() {
        let form = TicketForm {
            name: "   ".to_string(),
            ..TicketForm::new()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_overlong_name_fails_validation() {
        let form = TicketForm {
            name: "x".repeat(MAX_NAME_LEN + 1),
            ..TicketForm::new()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_create_payload_trims_and_normalizes() {
        let form = TicketForm {
            name: "  New feature  ".to_string(),
            description: "   ".to_string(),
            category: TicketCategory::Feature,
            status: TicketStatus::Backlog,
            editing: None,
        };

        match form.save_action().unwrap() {
            SaveAction::Create(create) => {
                assert_eq!(create.name, "New feature");
                assert!(create.description.is_none());
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_mode_emits_update() {
        let mut form = TicketForm::for_ticket(&ticket());
        assert!(form.is_edit_mode());
        form.description = "  updated steps  ".to_string();

        match form.save_action().unwrap() {
            SaveAction::Update { id, ticket } => {
                assert_eq!(id, TicketId::new(3));
                assert_eq!(ticket.name, "Fix login");
                assert_eq!(ticket.description.as_deref(), Some("updated steps"));
                assert_eq!(ticket.status, TicketStatus::InProgress);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_requires_confirmation_and_edit_mode() {
        let form = TicketForm::for_ticket(&ticket());
        assert_eq!(form.delete_action(false), None);
        assert_eq!(form.delete_action(true), Some(TicketId::new(3)));

        let create_form = TicketForm::new();
        assert_eq!(create_form.delete_action(true), None);
    }
}
