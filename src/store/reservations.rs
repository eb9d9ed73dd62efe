//! Reservation queue: per-book waitlists with teacher priority.
//!
//! Entries for all books share one list; the queue for a book is the
//! subsequence of entries with that book id, highest priority first.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{reservation::Reservation, user::Role},
};

pub struct ReservationQueue {
    entries: Vec<Reservation>,
}

impl ReservationQueue {
    pub fn new(entries: Vec<Reservation>) -> Self {
        Self { entries }
    }

    pub fn has(&self, book_id: i32, username: &str) -> bool {
        self.entries
            .iter()
            .any(|r| r.book_id == book_id && r.username == username)
    }

    /// Insert a reservation according to the priority rule.
    ///
    /// Teachers are placed immediately before the first existing entry for
    /// the same book whose requester is not a teacher; with no such entry
    /// they are appended. Non-teachers always append. The net effect is
    /// FIFO within role with teachers ahead of everyone else.
    ///
    /// Requester roles of queued entries are resolved through `role_of`, a
    /// pure lookup against the user directory; entries whose requester no
    /// longer resolves are treated as non-teachers.
    pub fn reserve(
        &mut self,
        book_id: i32,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
        role_of: impl Fn(&str) -> Option<Role>,
    ) -> AppResult<Reservation> {
        if self.has(book_id, username) {
            return Err(AppError::AlreadyExists(
                "You have already reserved this book.".to_string(),
            ));
        }

        let reservation = Reservation {
            book_id,
            username: username.to_string(),
            timestamp: now,
        };

        if role == Role::Teacher {
            let insert_pos = self
                .entries
                .iter()
                .position(|r| {
                    r.book_id == book_id && role_of(&r.username) != Some(Role::Teacher)
                })
                .unwrap_or(self.entries.len());
            self.entries.insert(insert_pos, reservation.clone());
        } else {
            self.entries.push(reservation.clone());
        }

        Ok(reservation)
    }

    /// Queue for one book, in priority order
    pub fn list_for(&self, book_id: i32) -> Vec<&Reservation> {
        self.entries.iter().filter(|r| r.book_id == book_id).collect()
    }

    /// Delete cascade for a removed book
    pub fn remove_all_for(&mut self, book_id: i32) {
        self.entries.retain(|r| r.book_id != book_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
