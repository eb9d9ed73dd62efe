//! Reservation workflow service.
//!
//! Reservations only apply to unavailable books. Returning a book does not
//! promote the head of its queue to a borrow; reservers must borrow once
//! the book is back (see DESIGN.md).

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{notification::Notification, reservation::Reservation, user::UserClaims},
    store::Store,
};

#[derive(Clone)]
pub struct ReservationsService {
    store: Store,
}

impl ReservationsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Queue the current user for an unavailable book
    pub fn reserve_book(
        &self,
        claims: &UserClaims,
        book_id: i32,
    ) -> AppResult<(Reservation, Notification)> {
        let mut data = self.store.write();
        let book = data
            .catalog
            .get(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if book.is_available {
            return Err(AppError::InvalidState(
                "Book is available and cannot be reserved.".to_string(),
            ));
        }
        let title = book.title.clone();

        // Split borrows so the queue can resolve requester roles against
        // the directory while it mutates.
        let crate::store::LibraryData {
            reservations,
            users,
            ..
        } = &mut *data;
        let reservation = reservations.reserve(
            book_id,
            &claims.sub,
            claims.role,
            Utc::now(),
            |username| users.role_of(username),
        )?;

        tracing::info!("Reservation: user={} book={}", claims.sub, book_id);
        let notification = Notification::success(format!("You have reserved '{}'.", title));
        Ok((reservation, notification))
    }

    /// Queue for one book in priority order
    pub fn reservations_for_book(&self, book_id: i32) -> AppResult<Vec<Reservation>> {
        let data = self.store.read();
        data.catalog
            .get(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;
        Ok(data
            .reservations
            .list_for(book_id)
            .into_iter()
            .cloned()
            .collect())
    }
}
