//! Borrow ledger: active borrows and their due dates

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{borrow::BorrowRecord, user::Role};

/// Window before the due date in which a borrow counts as due soon
const DUE_SOON_DAYS: i64 = 3;

pub struct Ledger {
    records: Vec<BorrowRecord>,
}

impl Ledger {
    pub fn new(records: Vec<BorrowRecord>) -> Self {
        Self { records }
    }

    pub fn record_for(&self, book_id: i32) -> Option<&BorrowRecord> {
        self.records.iter().find(|r| r.book_id == book_id)
    }

    pub fn is_borrowed(&self, book_id: i32) -> bool {
        self.record_for(book_id).is_some()
    }

    /// Append a borrow record with a role-dependent due date.
    /// The caller checks availability first and flips the book's flag in
    /// the same locked transaction.
    pub fn borrow(
        &mut self,
        book_id: i32,
        username: &str,
        role: Role,
        today: NaiveDate,
    ) -> BorrowRecord {
        let record = BorrowRecord {
            book_id,
            username: username.to_string(),
            due_date: today + Duration::days(role.borrow_days()),
        };
        self.records.push(record.clone());
        record
    }

    /// Remove the active record for a book. Returns `None` (a silent no-op)
    /// when the book is not borrowed.
    pub fn remove(&mut self, book_id: i32) -> Option<BorrowRecord> {
        let pos = self.records.iter().position(|r| r.book_id == book_id)?;
        Some(self.records.remove(pos))
    }

    pub fn records_for(&self, username: &str) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.username == username).collect()
    }

    pub fn count_for(&self, username: &str) -> usize {
        self.records.iter().filter(|r| r.username == username).count()
    }

    /// Active borrow counts keyed by borrower, for the user management view
    pub fn counts_per_borrower(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for record in &self.records {
            *counts.entry(record.username.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn overdue_count(&self, today: NaiveDate) -> usize {
        self.records.iter().filter(|r| is_overdue(r, today)).count()
    }

    pub fn due_soon_count(&self, today: NaiveDate) -> usize {
        self.records.iter().filter(|r| is_due_soon(r, today)).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn is_overdue(record: &BorrowRecord, today: NaiveDate) -> bool {
    record.due_date < today
}

/// Due within the next three days, exclusive of overdue
pub fn is_due_soon(record: &BorrowRecord, today: NaiveDate) -> bool {
    today < record.due_date && record.due_date <= today + Duration::days(DUE_SOON_DAYS)
}
