//! HTML page controller.

use crate::{
    responses::{PageError, PageResult},
    state::AppState,
};
use axum::{extract::State, response::Html, routing::get, Router};
use tracing::debug;

/// Creates the page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/users", get(user_list))
}

/// Landing page.
pub async fn welcome(State(state): State<AppState>) -> PageResult {
    state
        .ssr
        .render_welcome(&state.app.version)
        .map(Html)
        .map_err(|e| PageError::render(&state.ssr, e))
}

/// User table page.
pub async fn user_list(State(state): State<AppState>) -> PageResult {
    debug!("User list page request");

    let users = state
        .user_listing
        .list_users()
        .await
        .map_err(|e| PageError::render(&state.ssr, e))?;

    state
        .ssr
        .render_user_list(&users)
        .map(Html)
        .map_err(|e| PageError::render(&state.ssr, e))
}
