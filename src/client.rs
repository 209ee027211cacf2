use thiserror::Error;

use crate::api::dto::{CreateTicket, ErrorBody, StatusPatch, UpdateTicket};
use crate::domain::ticket::{Ticket, TicketId, TicketStatus};

/// Every adapter failure collapses to one human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: format!("Error: {err}"),
        }
    }
}

/// Thin HTTP client over the five ticket endpoints. No retries: a failed
/// call surfaces immediately to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:5048`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn tickets_url(&self) -> String {
        format!("{}/api/tickets", self.base_url)
    }

    fn ticket_url(&self, id: TicketId) -> String {
        format!("{}/api/tickets/{}", self.base_url, id)
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        let resp = self.http.get(self.tickets_url()).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket, ClientError> {
        let resp = self.http.get(self.ticket_url(id)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn create_ticket(&self, ticket: &CreateTicket) -> Result<Ticket, ClientError> {
        let resp = self.http.post(self.tickets_url()).json(ticket).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn update_ticket(
        &self,
        id: TicketId,
        ticket: &UpdateTicket,
    ) -> Result<Ticket, ClientError> {
        let resp = self.http.put(self.ticket_url(id)).json(ticket).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn update_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<Ticket, ClientError> {
        let url = format!("{}/status", self.ticket_url(id));
        let resp = self
            .http
            .patch(url)
            .json(&StatusPatch { status })
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn delete_ticket(&self, id: TicketId) -> Result<(), ClientError> {
        let resp = self.http.delete(self.ticket_url(id)).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Normalizes a non-2xx response: prefer the server body's `message`, fall
/// back to the status code.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => format!("Server returned code {}", status.as_u16()),
    };
    Err(ClientError { message })
}
