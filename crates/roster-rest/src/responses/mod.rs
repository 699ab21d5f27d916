//! Error responses for the JSON API and the HTML pages.

use roster_core::{ErrorResponse, RosterError};
use roster_ssr::SsrEngine;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

/// JSON body returned for failed API calls.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorResponse,
}

fn status_of(err: &RosterError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_failure(status: StatusCode, err: &RosterError) {
    if status.is_server_error() {
        error!(code = err.error_code(), "Request failed: {}", err);
    } else {
        warn!(code = err.error_code(), "Request rejected: {}", err);
    }
}

/// Application error type for the JSON API.
#[derive(Debug)]
pub struct AppError(pub RosterError);

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        log_failure(status, &self.0);

        let body = Json(ErrorEnvelope {
            error: ErrorResponse::from_error(&self.0),
        });

        (status, body).into_response()
    }
}

/// Result type for JSON handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Application error type for the HTML pages; renders the error page.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    html: String,
}

impl PageError {
    /// Renders `err` with the engine's error template.
    pub fn render(ssr: &SsrEngine, err: RosterError) -> Self {
        let status = status_of(&err);
        log_failure(status, &err);

        let message = status.canonical_reason().unwrap_or("Error");
        let html = ssr
            .render_error(status.as_u16(), message)
            .unwrap_or_else(|render_err| {
                error!("Error page failed to render: {}", render_err);
                format!("<h1>{} {}</h1>", status.as_u16(), message)
            });

        Self { status, html }
    }

    /// HTTP status of the page.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.html)).into_response()
    }
}

/// Result type for HTML handlers.
pub type PageResult = Result<Html<String>, PageError>;
