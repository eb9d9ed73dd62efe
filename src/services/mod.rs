//! Business logic services

pub mod auth;
pub mod borrows;
pub mod catalog;
pub mod reservations;
pub mod stats;

use crate::{config::AuthConfig, store::Store};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub reservations: reservations::ReservationsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services sharing the given store
    pub fn new(store: Store, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(store.clone(), auth_config),
            catalog: catalog::CatalogService::new(store.clone()),
            borrows: borrows::BorrowsService::new(store.clone()),
            reservations: reservations::ReservationsService::new(store.clone()),
            stats: stats::StatsService::new(store),
        }
    }
}
