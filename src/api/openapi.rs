//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.1.0",
        description = "School Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        auth::me,
        // Books
        books::list_books,
        books::list_categories,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::borrow_book,
        books::return_book,
        books::reserve_book,
        books::list_reservations,
        // Borrows
        borrows::my_borrows,
        // Users
        users::list_users,
        // Stats
        stats::get_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::LoginResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::Category,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookPage,
            books::BookResponse,
            books::BorrowResponse,
            books::ActionResponse,
            books::ReserveResponse,
            // Borrows & reservations
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowDetails,
            crate::models::reservation::Reservation,
            // Users
            crate::models::user::Role,
            crate::models::user::UserInfo,
            crate::models::user::UserSummary,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::NotificationLevel,
            // Stats
            crate::services::stats::DashboardStats,
            stats::DashboardResponse,
            // Errors
            crate::error::ErrorResponse,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "books", description = "Catalog browsing and workflows"),
        (name = "borrows", description = "Borrow listings"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Router serving the Swagger UI and the raw OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}
