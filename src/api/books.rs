//! Book catalog endpoints: browsing plus the borrow, return and reserve
//! workflows.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        notification::Notification,
        reservation::Reservation,
    },
};

use super::AuthenticatedUser;

/// One page of catalog results
#[derive(Serialize, ToSchema)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Book plus the notification describing what happened
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
    pub notification: Notification,
}

/// Outcome of a borrow
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub due_date: NaiveDate,
    pub notification: Notification,
}

/// Outcome of an action that only produces a notification
#[derive(Serialize, ToSchema)]
pub struct ActionResponse {
    pub notification: Notification,
}

/// Outcome of a reservation
#[derive(Serialize, ToSchema)]
pub struct ReserveResponse {
    pub reservation: Reservation,
    pub notification: Notification,
}

/// List books with search, filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of books", body = BookPage)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookPage>> {
    let per_page = query.per_page.unwrap_or(state.config.catalog.books_per_page);
    let page = query.page.unwrap_or(1);
    let result = state
        .services
        .catalog
        .list_books(&query, state.config.catalog.books_per_page);

    Ok(Json(BookPage {
        books: result.books,
        total: result.total,
        total_pages: result.total_pages,
        page,
        per_page,
    }))
}

/// Category names for the filter dropdown ("All" first)
#[utoipa::path(
    get,
    path = "/books/categories",
    tag = "books",
    responses(
        (status = 200, description = "Category names", body = Vec<String>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> Json<Vec<String>> {
    Json(state.services.catalog.categories())
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id)?;
    Ok(Json(book))
}

/// Add a new book (librarian only)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 403, description = "Not a librarian")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(fields): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    fields.validate()?;

    let (book, notification) = state.services.catalog.create_book(&claims, fields)?;
    Ok((StatusCode::CREATED, Json(BookResponse { book, notification })))
}

/// Update an existing book (librarian only)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 403, description = "Not a librarian"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(patch): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    patch.validate()?;

    let (book, notification) = state.services.catalog.update_book(&claims, id, patch)?;
    Ok(Json(BookResponse { book, notification }))
}

/// Delete a book (librarian only; rejected while borrowed)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = ActionResponse),
        (status = 403, description = "Not a librarian"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is currently borrowed")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    let notification = state.services.catalog.delete_book(&claims, id)?;
    Ok(Json(ActionResponse { notification }))
}

/// Borrow a book as the current user
#[utoipa::path(
    post,
    path = "/books/{id}/borrow",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book borrowed", body = BorrowResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is not available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowResponse>> {
    let (record, notification) = state.services.borrows.borrow_book(&claims, id)?;
    Ok(Json(BorrowResponse {
        due_date: record.due_date,
        notification,
    }))
}

/// Return a borrowed book.
/// Any authenticated user may return any book; no ownership check is made.
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ActionResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    let notification = state.services.borrows.return_book(id)?;
    Ok(Json(ActionResponse { notification }))
}

/// Reserve an unavailable book as the current user
#[utoipa::path(
    post,
    path = "/books/{id}/reserve",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book reserved", body = ReserveResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Already reserved by this user"),
        (status = 422, description = "Book is available, not reservable")
    )
)]
pub async fn reserve_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReserveResponse>> {
    let (reservation, notification) = state.services.reservations.reserve_book(&claims, id)?;
    Ok(Json(ReserveResponse {
        reservation,
        notification,
    }))
}

/// Waitlist for a book, highest priority first
#[utoipa::path(
    get,
    path = "/books/{id}/reservations",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reservations in queue order", body = Vec<Reservation>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.reservations_for_book(id)?;
    Ok(Json(reservations))
}
