//! Catalog management service.
//!
//! Mutations are librarian-only and enforced here, not in the presentation
//! layer. Delete is transactional across the catalog, ledger and
//! reservation queue under the single write lock.

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        notification::Notification,
        user::UserClaims,
    },
    store::{catalog, Store},
};

#[derive(Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Filtered, paginated book listing
    pub fn list_books(&self, query: &BookQuery, default_per_page: usize) -> catalog::Page {
        let data = self.store.read();
        let results = data.catalog.filtered(
            query.search.as_deref(),
            query.category.as_deref(),
            query.availability.as_deref(),
        );
        catalog::paginate(
            results,
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(default_per_page),
        )
    }

    /// Category names for the filter dropdown, with the "All" sentinel first
    pub fn categories(&self) -> Vec<String> {
        let mut names = vec!["All".to_string()];
        names.extend(self.store.read().catalog.categories());
        names
    }

    pub fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store
            .read()
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub fn create_book(
        &self,
        claims: &UserClaims,
        fields: CreateBook,
    ) -> AppResult<(Book, Notification)> {
        claims.require_librarian()?;

        let book = self.store.write().catalog.add(fields);
        tracing::info!("Catalog: added book id={} '{}'", book.id, book.title);
        let notification = Notification::success(format!("Added '{}'.", book.title));
        Ok((book, notification))
    }

    pub fn update_book(
        &self,
        claims: &UserClaims,
        id: i32,
        patch: UpdateBook,
    ) -> AppResult<(Book, Notification)> {
        claims.require_librarian()?;

        let book = self.store.write().catalog.update(id, patch)?;
        let notification = Notification::success(format!("Updated '{}'.", book.title));
        Ok((book, notification))
    }

    /// Delete a book and cascade its reservations. Rejected while the book
    /// is borrowed, leaving all stores untouched.
    pub fn delete_book(&self, claims: &UserClaims, id: i32) -> AppResult<Notification> {
        claims.require_librarian()?;

        let mut data = self.store.write();
        if data.ledger.is_borrowed(id) {
            return Err(AppError::Conflict(
                "Cannot delete a book that is currently borrowed.".to_string(),
            ));
        }
        let book = data.catalog.remove(id)?;
        data.reservations.remove_all_for(id);
        tracing::info!("Catalog: deleted book id={} '{}'", book.id, book.title);
        Ok(Notification::info(format!("Deleted '{}'.", book.title)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::Category;
    use crate::models::user::Role;
    use crate::store::{Catalog, Ledger, LibraryData, ReservationQueue, UserDirectory};

    fn claims(role: Role) -> UserClaims {
        UserClaims {
            sub: match role {
                Role::Librarian => "librarian".to_string(),
                Role::Teacher => "teacher".to_string(),
                Role::Student => "student".to_string(),
            },
            name: "Test".to_string(),
            role,
            exp: 0,
            iat: 0,
        }
    }

    fn create_fields(title: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Alex Smith".to_string(),
            category: Category::Fantasy,
            description: "A tale.".to_string(),
            cover_image_url: None,
            isbn: None,
            publication_year: Some(2001),
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Store::new(LibraryData {
            catalog: Catalog::new(vec![]),
            ledger: Ledger::new(vec![]),
            reservations: ReservationQueue::new(vec![]),
            users: UserDirectory::seeded(),
        }))
    }

    #[test]
    fn test_add_then_get_round_trip() {
        let catalog = service();
        let (created, _) = catalog
            .create_book(&claims(Role::Librarian), create_fields("The Lost Key"))
            .unwrap();
        let fetched = catalog.get_book(created.id).unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.is_available);
        assert_eq!(fetched.publication_year, 2001);
    }

    #[test]
    fn test_mutations_require_librarian() {
        let catalog = service();
        for role in [Role::Student, Role::Teacher] {
            let err = catalog.create_book(&claims(role), create_fields("X"));
            assert!(matches!(err, Err(AppError::Authorization(_))));
        }
        assert_eq!(catalog.list_books(&BookQuery::default(), 20).total, 0);
    }

    #[test]
    fn test_delete_borrowed_book_conflicts_and_leaves_state() {
        let catalog = service();
        let librarian = claims(Role::Librarian);
        let (book, _) = catalog.create_book(&librarian, create_fields("Borrowed")).unwrap();

        {
            let mut data = catalog.store.write();
            let today = chrono::Utc::now().date_naive();
            data.ledger.borrow(book.id, "student", Role::Student, today);
            data.catalog.set_availability(book.id, false).unwrap();
            data.reservations
                .reserve(book.id, "teacher", Role::Teacher, chrono::Utc::now(), |_| {
                    Some(Role::Teacher)
                })
                .unwrap();
        }

        let err = catalog.delete_book(&librarian, book.id);
        assert!(matches!(err, Err(AppError::Conflict(_))));

        let data = catalog.store.read();
        assert!(data.catalog.get(book.id).is_some());
        assert!(data.ledger.is_borrowed(book.id));
        assert_eq!(data.reservations.list_for(book.id).len(), 1);
    }

    #[test]
    fn test_delete_cascades_reservations() {
        let catalog = service();
        let librarian = claims(Role::Librarian);
        let (book, _) = catalog.create_book(&librarian, create_fields("Doomed")).unwrap();

        {
            let mut data = catalog.store.write();
            data.catalog.set_availability(book.id, false).unwrap();
            data.reservations
                .reserve(book.id, "student", Role::Student, chrono::Utc::now(), |_| {
                    Some(Role::Student)
                })
                .unwrap();
            data.catalog.set_availability(book.id, true).unwrap();
        }

        catalog.delete_book(&librarian, book.id).unwrap();
        let data = catalog.store.read();
        assert!(data.catalog.get(book.id).is_none());
        assert!(data.reservations.is_empty());
    }
}
