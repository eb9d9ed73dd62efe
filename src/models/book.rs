//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Fixed genre tags for catalog books
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Fiction,
    Dystopian,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Science,
    History,
    Biography,
    Technology,
    Art,
    Philosophy,
    Romance,
    Thriller,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Business,
    Children,
    Poetry,
    Drama,
    Travel,
}

impl Category {
    /// All categories in declaration order, used by the seed generator
    /// and the filter dropdown endpoint.
    pub const ALL: [Category; 20] = [
        Category::Fiction,
        Category::Dystopian,
        Category::ScienceFiction,
        Category::Fantasy,
        Category::Mystery,
        Category::NonFiction,
        Category::Science,
        Category::History,
        Category::Biography,
        Category::Technology,
        Category::Art,
        Category::Philosophy,
        Category::Romance,
        Category::Thriller,
        Category::SelfHelp,
        Category::Business,
        Category::Children,
        Category::Poetry,
        Category::Drama,
        Category::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::Dystopian => "Dystopian",
            Category::ScienceFiction => "Science Fiction",
            Category::Fantasy => "Fantasy",
            Category::Mystery => "Mystery",
            Category::NonFiction => "Non-Fiction",
            Category::Science => "Science",
            Category::History => "History",
            Category::Biography => "Biography",
            Category::Technology => "Technology",
            Category::Art => "Art",
            Category::Philosophy => "Philosophy",
            Category::Romance => "Romance",
            Category::Thriller => "Thriller",
            Category::SelfHelp => "Self-Help",
            Category::Business => "Business",
            Category::Children => "Children",
            Category::Poetry => "Poetry",
            Category::Drama => "Drama",
            Category::Travel => "Travel",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Catalog book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub cover_image_url: String,
    pub is_available: bool,
    pub description: String,
    pub isbn: String,
    pub publication_year: i32,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub category: Category,
    pub description: String,
    /// Cover image URL; defaults to the placeholder when absent or empty
    pub cover_image_url: Option<String>,
    pub isbn: Option<String>,
    /// Defaults to the current year when absent
    pub publication_year: Option<i32>,
}

/// Update book request; absent fields keep the previous value
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub category: Category,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match on title or author
    pub search: Option<String>,
    /// Exact category name, or the "All" sentinel
    pub category: Option<String>,
    /// "available", "borrowed", or the "all" sentinel
    pub availability: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}
