//! User management endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::user::UserSummary};

use super::AuthenticatedUser;

/// All users with their active borrow counts (librarian only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users with borrow counts", body = Vec<UserSummary>),
        (status = 403, description = "Not a librarian")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    claims.require_librarian()?;

    Ok(Json(state.services.stats.user_summaries()))
}
