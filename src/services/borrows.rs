//! Borrow workflow service: borrowing, returning and the dashboard's
//! overdue scan.

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowDetails, BorrowRecord},
        notification::Notification,
        user::UserClaims,
    },
    store::{ledger, Store},
};

#[derive(Clone)]
pub struct BorrowsService {
    store: Store,
}

impl BorrowsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Borrow a book for the current user.
    /// Teachers get 30 days, everyone else 14. Flipping the availability
    /// flag and appending the ledger record happen under one write lock.
    pub fn borrow_book(
        &self,
        claims: &UserClaims,
        book_id: i32,
    ) -> AppResult<(BorrowRecord, Notification)> {
        let mut data = self.store.write();
        let book = data
            .catalog
            .get(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if !book.is_available {
            return Err(AppError::NotAvailable(
                "Book is not available for borrowing.".to_string(),
            ));
        }
        let title = book.title.clone();

        let today = Utc::now().date_naive();
        let record = data.ledger.borrow(book_id, &claims.sub, claims.role, today);
        data.catalog.set_availability(book_id, false)?;

        tracing::info!(
            "Borrow: user={} book={} due={}",
            claims.sub,
            book_id,
            record.due_date
        );
        let notification = Notification::success(format!("Successfully borrowed '{}'!", title));
        Ok((record, notification))
    }

    /// Return a book. Open to any caller; no borrower-ownership check is
    /// made. Returning a book that is not borrowed is a no-op.
    pub fn return_book(&self, book_id: i32) -> AppResult<Notification> {
        let mut data = self.store.write();
        let book = data
            .catalog
            .get(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;
        let title = book.title.clone();

        data.ledger.remove(book_id);
        data.catalog.set_availability(book_id, true)?;

        Ok(Notification::info(format!("You have returned '{}'.", title)))
    }

    /// Current user's active borrows joined with book details
    pub fn my_borrows(&self, claims: &UserClaims) -> Vec<BorrowDetails> {
        let today = Utc::now().date_naive();
        self.borrows_for(&claims.sub, today)
    }

    fn borrows_for(&self, username: &str, today: NaiveDate) -> Vec<BorrowDetails> {
        let data = self.store.read();
        data.ledger
            .records_for(username)
            .into_iter()
            .filter_map(|record| {
                let book = data.catalog.get(record.book_id)?;
                Some(BorrowDetails {
                    book: book.clone(),
                    due_date: record.due_date,
                    is_overdue: ledger::is_overdue(record, today),
                    is_due_soon: ledger::is_due_soon(record, today),
                })
            })
            .collect()
    }

    /// Dashboard scan: one warning per overdue borrow held by the current
    /// user. Read-only.
    pub fn overdue_notifications(&self, claims: &UserClaims) -> Vec<Notification> {
        let today = Utc::now().date_naive();
        let data = self.store.read();
        data.ledger
            .records_for(&claims.sub)
            .into_iter()
            .filter(|record| ledger::is_overdue(record, today))
            .filter_map(|record| data.catalog.get(record.book_id))
            .map(|book| Notification::warning(format!("'{}' is overdue!", book.title)))
            .collect()
    }
}
