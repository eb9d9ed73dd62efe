//! Reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry in a book's waitlist.
/// A given (book_id, username) pair appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub book_id: i32,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}
