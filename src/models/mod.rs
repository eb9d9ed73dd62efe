//! Domain models

pub mod book;
pub mod borrow;
pub mod notification;
pub mod reservation;
pub mod user;

pub use book::{Book, Category};
pub use borrow::BorrowRecord;
pub use notification::{Notification, NotificationLevel};
pub use reservation::Reservation;
pub use user::{Role, User};
