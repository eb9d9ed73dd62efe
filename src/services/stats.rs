//! Statistics service for the dashboard and user management views

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{models::user::UserSummary, store::Store};

/// Dashboard counters
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_books: usize,
    pub borrowed_books: usize,
    pub available_books: usize,
    pub overdue_books: usize,
    pub books_due_soon: usize,
    pub total_users: usize,
}

#[derive(Clone)]
pub struct StatsService {
    store: Store,
}

impl StatsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn dashboard(&self) -> DashboardStats {
        let today = Utc::now().date_naive();
        let data = self.store.read();
        let total_books = data.catalog.len();
        let borrowed_books = data.catalog.borrowed_count();
        DashboardStats {
            total_books,
            borrowed_books,
            available_books: total_books - borrowed_books,
            overdue_books: data.ledger.overdue_count(today),
            books_due_soon: data.ledger.due_soon_count(today),
            total_users: data.users.len(),
        }
    }

    /// All users with their active borrow counts
    pub fn user_summaries(&self) -> Vec<UserSummary> {
        let data = self.store.read();
        let counts = data.ledger.counts_per_borrower();
        data.users
            .iter()
            .map(|user| UserSummary {
                username: user.username.clone(),
                name: user.name.clone(),
                role: user.role,
                active_borrows: counts.get(&user.username).copied().unwrap_or(0),
            })
            .collect()
    }
}
