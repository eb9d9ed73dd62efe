//! Catalog store: the authoritative list of books.
//!
//! Books are kept in insertion order with the most recently added first,
//! matching what the list endpoints return.

use chrono::{Datelike, Utc};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

/// Cover used when a book is created without one
pub const PLACEHOLDER_COVER: &str = "/placeholder.svg";

/// One page of filtered results
#[derive(Debug, Clone)]
pub struct Page {
    pub books: Vec<Book>,
    pub total: usize,
    pub total_pages: usize,
}

pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn get(&self, id: i32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Create a book with the next id and insert it at the head of the list
    pub fn add(&mut self, fields: CreateBook) -> Book {
        let new_id = self.books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let book = Book {
            id: new_id,
            title: fields.title,
            author: fields.author,
            category: fields.category,
            cover_image_url: fields
                .cover_image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
            is_available: true,
            description: fields.description,
            isbn: fields.isbn.unwrap_or_default(),
            publication_year: fields.publication_year.unwrap_or_else(|| Utc::now().year()),
        };
        self.books.insert(0, book.clone());
        book
    }

    /// Replace the matching book in place; absent optional fields keep the
    /// previous value, as the edit form does.
    pub fn update(&mut self, id: i32, patch: UpdateBook) -> AppResult<Book> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.title = patch.title;
        book.author = patch.author;
        book.category = patch.category;
        book.description = patch.description;
        if let Some(url) = patch.cover_image_url.filter(|url| !url.is_empty()) {
            book.cover_image_url = url;
        }
        if let Some(isbn) = patch.isbn.filter(|isbn| !isbn.is_empty()) {
            book.isbn = isbn;
        }
        if let Some(year) = patch.publication_year {
            book.publication_year = year;
        }
        Ok(book.clone())
    }

    /// Remove a book from the catalog. The borrowed-book conflict check and
    /// the reservation cascade are handled by the service, which holds the
    /// write lock across all three stores.
    pub fn remove(&mut self, id: i32) -> AppResult<Book> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        Ok(self.books.remove(pos))
    }

    pub fn set_availability(&mut self, id: i32, available: bool) -> AppResult<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        book.is_available = available;
        Ok(())
    }

    /// Filter books by search text, category and availability.
    ///
    /// Search is a case-insensitive substring match on title or author.
    /// `category` of "All" and `availability` of "all" are pass-through
    /// sentinels; filters compose with AND. Results keep catalog order.
    pub fn filtered(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        availability: Option<&str>,
    ) -> Vec<&Book> {
        let query = search
            .map(str::to_lowercase)
            .filter(|q| !q.is_empty());

        self.books
            .iter()
            .filter(|b| match &query {
                Some(q) => {
                    b.title.to_lowercase().contains(q) || b.author.to_lowercase().contains(q)
                }
                None => true,
            })
            .filter(|b| match category {
                Some(c) if c != "All" => b.category.as_str() == c,
                _ => true,
            })
            .filter(|b| match availability {
                Some("available") => b.is_available,
                Some("borrowed") => !b.is_available,
                _ => true,
            })
            .collect()
    }

    /// Sorted distinct category names present in the catalog
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .books
            .iter()
            .map(|b| b.category.as_str().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn borrowed_count(&self) -> usize {
        self.books.iter().filter(|b| !b.is_available).count()
    }
}

/// Number of pages needed for `total` results, never less than 1 so an
/// empty result set still renders as page 1 of 1.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Slice out the 1-based `page` of `results`. Out-of-range pages yield an
/// empty slice; clamping prev/next is the caller's concern.
pub fn paginate(results: Vec<&Book>, page: usize, per_page: usize) -> Page {
    let total = results.len();
    let pages = total_pages(total, per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let books = results
        .into_iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();
    Page {
        books,
        total,
        total_pages: pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::Category;

    fn book(id: i32, title: &str, author: &str, category: Category, available: bool) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category,
            cover_image_url: PLACEHOLDER_COVER.to_string(),
            is_available: available,
            description: String::new(),
            isbn: String::new(),
            publication_year: 2020,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            book(3, "The Crimson River", "Alex Smith", Category::Fantasy, true),
            book(2, "Quantum Cipher", "Jordan Brown", Category::ScienceFiction, false),
            book(1, "A Silent Garden", "Taylor Jones", Category::Fantasy, true),
        ])
    }

    #[test]
    fn test_add_assigns_next_id_and_inserts_at_head() {
        let mut catalog = sample_catalog();
        let created = catalog.add(CreateBook {
            title: "New Book".to_string(),
            author: "Casey Davis".to_string(),
            category: Category::History,
            description: "A history.".to_string(),
            cover_image_url: None,
            isbn: None,
            publication_year: Some(1999),
        });

        assert_eq!(created.id, 4);
        assert!(created.is_available);
        assert_eq!(created.cover_image_url, PLACEHOLDER_COVER);
        assert_eq!(catalog.iter().next().map(|b| b.id), Some(4));
        assert_eq!(catalog.get(4), Some(&created));
    }

    #[test]
    fn test_add_to_empty_catalog_starts_at_one() {
        let mut catalog = Catalog::new(vec![]);
        let created = catalog.add(CreateBook {
            title: "First".to_string(),
            author: "A".to_string(),
            category: Category::Poetry,
            description: String::new(),
            cover_image_url: Some(String::new()),
            isbn: Some("123".to_string()),
            publication_year: None,
        });
        assert_eq!(created.id, 1);
        assert_eq!(created.isbn, "123");
        assert_eq!(created.cover_image_url, PLACEHOLDER_COVER);
    }

    #[test]
    fn test_update_missing_book_is_not_found() {
        let mut catalog = sample_catalog();
        let err = catalog.update(
            99,
            UpdateBook {
                title: "X".to_string(),
                author: "Y".to_string(),
                category: Category::Drama,
                description: String::new(),
                cover_image_url: None,
                isbn: None,
                publication_year: None,
            },
        );
        assert!(matches!(err, Err(crate::error::AppError::NotFound(_))));
    }

    #[test]
    fn test_update_keeps_previous_optional_fields() {
        let mut catalog = sample_catalog();
        let before = catalog.get(2).unwrap().clone();
        let updated = catalog
            .update(
                2,
                UpdateBook {
                    title: "Quantum Cipher II".to_string(),
                    author: before.author.clone(),
                    category: before.category,
                    description: "revised".to_string(),
                    cover_image_url: Some(String::new()),
                    isbn: None,
                    publication_year: None,
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Quantum Cipher II");
        assert_eq!(updated.cover_image_url, before.cover_image_url);
        assert_eq!(updated.publication_year, before.publication_year);
        assert!(!updated.is_available);
    }

    #[test]
    fn test_filter_search_matches_title_or_author_case_insensitive() {
        let catalog = sample_catalog();
        let by_title = catalog.filtered(Some("crimson"), None, None);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 3);

        let by_author = catalog.filtered(Some("JORDAN"), None, None);
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, 2);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let catalog = sample_catalog();
        let hits = catalog.filtered(None, Some("Fantasy"), Some("available"));
        assert_eq!(hits.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 1]);

        let none = catalog.filtered(Some("crimson"), Some("Fantasy"), Some("borrowed"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_sentinels_pass_everything_through() {
        let catalog = sample_catalog();
        let all = catalog.filtered(None, Some("All"), Some("all"));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(10_000, 20), 500);
    }

    #[test]
    fn test_paginate_slices_one_based_pages() {
        let catalog = sample_catalog();
        let page = paginate(catalog.filtered(None, None, None), 2, 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_paginate_empty_results() {
        let catalog = sample_catalog();
        let page = paginate(catalog.filtered(Some("no such book"), None, None), 1, 20);
        assert!(page.books.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_categories_sorted_distinct() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.categories(),
            vec!["Fantasy".to_string(), "Science Fiction".to_string()]
        );
    }
}
