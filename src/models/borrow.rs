//! Borrow record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::Book;

/// Active borrow of one book by one user.
/// At most one record exists per book id at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecord {
    pub book_id: i32,
    pub username: String,
    pub due_date: NaiveDate,
}

/// Borrow record joined with the borrowed book, for dashboard views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowDetails {
    pub book: Book,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
    pub is_due_soon: bool,
}
