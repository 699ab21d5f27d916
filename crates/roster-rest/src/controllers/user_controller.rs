//! User listing API controller.

use crate::{responses::ApiResult, state::AppState};
use axum::{extract::State, routing::get, Json, Router};
use roster_service::UserListResponse;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

/// List all users, newest first.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, newest first", body = UserListResponse),
        (status = 500, description = "User storage is unavailable", body = crate::responses::ErrorEnvelope)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<UserListResponse> {
    debug!("List users request");

    let users = state.user_listing.list_users().await?;
    Ok(Json(UserListResponse::from(users)))
}
