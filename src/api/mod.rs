use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use tracing::error;

use crate::{
    domain::ticket::{Ticket, TicketId},
    error::BoardError,
    service::TicketService,
};

pub mod dto;

use dto::{CreateTicket, ErrorBody, StatusPatch, UpdateTicket};

/// Shared handler dependencies.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TicketService>,
    pub allowed_origin: String,
}

/// Outcome taxonomy for the five endpoints. Internal errors carry only a
/// generic message; the underlying failure is logged where it happens.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(TicketId),
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Ticket with ID {id} not found"),
            ),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/api/tickets/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/api/tickets/:id/status", patch(patch_ticket_status))
        .layer(middleware::from_fn_with_state(state.clone(), cors_middleware))
        .with_state(state)
}

async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = state.service.list_all().await.map_err(|err| {
        error!(error = %err, "failed to list tickets");
        ApiError::Internal("An error occurred while loading tickets")
    })?;
    Ok(Json(tickets))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    let id = TicketId::new(id);
    match state.service.get(id).await {
        Ok(ticket) => Ok(Json(ticket)),
        Err(BoardError::TicketNotFound(id)) => Err(ApiError::NotFound(id)),
        Err(err) => {
            error!(ticket_id = id.get(), error = %err, "failed to load ticket");
            Err(ApiError::Internal("An error occurred while loading the ticket"))
        }
    }
}

async fn create_ticket(
    State(state): State<AppState>,
    Json(body): Json<CreateTicket>,
) -> Result<Response, ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let ticket = state.service.create(body).await.map_err(|err| {
        error!(error = %err, "failed to create ticket");
        ApiError::Internal("An error occurred while creating the ticket")
    })?;

    let location = format!("/api/tickets/{}", ticket.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ticket),
    )
        .into_response())
}

async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTicket>,
) -> Result<Json<Ticket>, ApiError> {
    let id = valid_id(id)?;
    body.validate().map_err(ApiError::Validation)?;

    match state.service.full_update(id, body).await {
        Ok(ticket) => Ok(Json(ticket)),
        Err(BoardError::TicketNotFound(id)) => Err(ApiError::NotFound(id)),
        Err(err) => {
            error!(ticket_id = id.get(), error = %err, "failed to update ticket");
            Err(ApiError::Internal("An error occurred while updating the ticket"))
        }
    }
}

async fn patch_ticket_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusPatch>,
) -> Result<Json<Ticket>, ApiError> {
    let id = valid_id(id)?;

    match state.service.patch_status(id, body.status).await {
        Ok(ticket) => Ok(Json(ticket)),
        Err(BoardError::TicketNotFound(id)) => Err(ApiError::NotFound(id)),
        Err(err) => {
            error!(ticket_id = id.get(), error = %err, "failed to update ticket status");
            Err(ApiError::Internal(
                "An error occurred while updating ticket status",
            ))
        }
    }
}

async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = valid_id(id)?;

    match state.service.delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::NotFound(id)),
        Err(err) => {
            error!(ticket_id = id.get(), error = %err, "failed to delete ticket");
            Err(ApiError::Internal("An error occurred while deleting the ticket"))
        }
    }
}

fn valid_id(id: i64) -> Result<TicketId, ApiError> {
    if id <= 0 {
        return Err(ApiError::Validation("Invalid ticket ID".to_string()));
    }
    Ok(TicketId::new(id))
}

/// Cross-origin access restricted to the one configured frontend origin.
async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let allowed = origin.as_deref() == Some(state.allowed_origin.as_str());

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if allowed {
            apply_cors_headers(&mut resp, &state.allowed_origin);
            resp.headers_mut().insert(
                "access-control-allow-methods",
                HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
            );
            resp.headers_mut().insert(
                "access-control-allow-headers",
                HeaderValue::from_static("content-type"),
            );
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if allowed {
        apply_cors_headers(&mut resp, &state.allowed_origin);
        resp.headers_mut()
            .insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    resp
}

fn apply_cors_headers(resp: &mut Response, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        resp.headers_mut()
            .insert("access-control-allow-origin", value);
    }
}
