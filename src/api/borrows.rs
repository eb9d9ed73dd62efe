//! Borrow listing endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::borrow::BorrowDetails};

use super::AuthenticatedUser;

/// Current user's active borrows with book details and due flags
#[utoipa::path(
    get,
    path = "/borrows/me",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active borrows", body = Vec<BorrowDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowDetails>>> {
    Ok(Json(state.services.borrows.my_borrows(&claims)))
}
