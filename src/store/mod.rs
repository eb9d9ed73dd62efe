//! In-memory data layer.
//!
//! All server state lives in a single [`LibraryData`] value behind one
//! `RwLock`. Every mutation takes the write lock for its full duration, so
//! cross-store operations (borrow, delete with reservation cascade) are
//! atomic: they are either fully applied or not applied at all.

pub mod catalog;
pub mod ledger;
pub mod reservations;
pub mod users;

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use catalog::Catalog;
pub use ledger::Ledger;
pub use reservations::ReservationQueue;
pub use users::UserDirectory;

/// The complete mutable state of the server
pub struct LibraryData {
    pub catalog: Catalog,
    pub ledger: Ledger,
    pub reservations: ReservationQueue,
    pub users: UserDirectory,
}

/// Shared handle to the library state
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<LibraryData>>,
}

impl Store {
    pub fn new(data: LibraryData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, LibraryData> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, LibraryData> {
        self.inner.write()
    }
}
