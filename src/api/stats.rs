//! Dashboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::notification::Notification,
    services::stats::DashboardStats,
};

use super::AuthenticatedUser;

/// Dashboard payload: counters plus the overdue warnings emitted on each
/// dashboard load for the current user
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub notifications: Vec<Notification>,
}

/// Dashboard view for the current user
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters and overdue warnings", body = DashboardResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    Ok(Json(DashboardResponse {
        stats: state.services.stats.dashboard(),
        notifications: state.services.borrows.overdue_notifications(&claims),
    }))
}
