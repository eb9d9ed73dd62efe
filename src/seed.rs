//! Synthetic seed data.
//!
//! State is ephemeral: every process start rebuilds the catalog from this
//! generator, marks a fixed set of ids as already borrowed and seeds three
//! borrow records against the built-in accounts.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    config::CatalogConfig,
    models::{
        book::{Book, Category},
        borrow::BorrowRecord,
    },
    store::{Catalog, Ledger, LibraryData, ReservationQueue, UserDirectory},
};

/// Book ids pre-marked unavailable in a fresh catalog
const BORROWED_IDS: [i32; 15] = [3, 5, 9, 12, 15, 21, 28, 34, 42, 50, 61, 75, 88, 99, 101];

const FIRST_NAMES: [&str; 10] = [
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Avery", "Cameron", "Skyler",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const TITLE_PARTS_1: [&str; 10] = [
    "The", "A", "My", "Our", "An Echo of", "Whispers of", "Shadows in", "The Secret of",
    "Journey to", "Chronicles of",
];
const TITLE_PARTS_2: [&str; 10] = [
    "Crimson", "Golden", "Silent", "Forgotten", "Lost", "Ancient", "Hidden", "Quantum",
    "Starlight", "Midnight",
];
const TITLE_PARTS_3: [&str; 10] = [
    "River", "Mountain", "Throne", "Garden", "Key", "Cipher", "Legacy", "Prophecy", "Paradox",
    "Odyssey",
];
const DESC_PARTS_1: [&str; 5] = [
    "In a world where",
    "The story of a",
    "Discover the tale of",
    "A gripping narrative about",
    "Explore the life of",
];
const DESC_PARTS_2: [&str; 5] = [
    "magic is forbidden",
    "technology reigns supreme",
    "dreams can kill",
    "the past haunts the present",
    "a forgotten hero",
];
const DESC_PARTS_3: [&str; 5] = [
    "one person must",
    "a small group of rebels will",
    "an unlikely hero emerges to",
    "a journey begins to",
    "the fate of the universe rests on",
];
const DESC_PARTS_4: [&str; 5] = [
    "challenge the system.",
    "find their destiny.",
    "uncover a dark secret.",
    "save their world.",
    "change the course of history.",
];

/// Generate `count` synthetic books with ids 1..=count
pub fn generate_books(count: u32) -> Vec<Book> {
    let mut rng = rand::thread_rng();
    let mut books = Vec::with_capacity(count as usize);

    for id in 1..=count as i32 {
        let title = format!(
            "{} {} {}",
            TITLE_PARTS_1.choose(&mut rng).unwrap(),
            TITLE_PARTS_2.choose(&mut rng).unwrap(),
            TITLE_PARTS_3.choose(&mut rng).unwrap(),
        );
        let description = format!(
            "{} {}, {} {}",
            DESC_PARTS_1.choose(&mut rng).unwrap(),
            DESC_PARTS_2.choose(&mut rng).unwrap(),
            DESC_PARTS_3.choose(&mut rng).unwrap(),
            DESC_PARTS_4.choose(&mut rng).unwrap(),
        );
        let isbn = format!(
            "{}-{}-{}-{}-{}",
            rng.gen_range(100..=999),
            rng.gen_range(10..=99),
            rng.gen_range(1000..=9999),
            rng.gen_range(100_000..=999_999),
            rng.gen_range(0..=9),
        );

        books.push(Book {
            id,
            title,
            author: format!(
                "{} {}",
                FIRST_NAMES.choose(&mut rng).unwrap(),
                LAST_NAMES.choose(&mut rng).unwrap(),
            ),
            category: *Category::ALL.choose(&mut rng).unwrap(),
            cover_image_url: format!("https://picsum.photos/seed/{}/400/600", isbn),
            is_available: rng.gen::<f64>() > 0.2,
            description,
            isbn,
            publication_year: rng.gen_range(1950..=2024),
        });
    }

    books
}

/// Build the full initial state: generated catalog, seed borrows, seed
/// users and an empty reservation queue.
pub fn initial_data(config: &CatalogConfig) -> LibraryData {
    let mut books = generate_books(config.seed_count);
    for book in &mut books {
        if BORROWED_IDS.contains(&book.id) {
            book.is_available = false;
        }
    }

    let today = Utc::now().date_naive();
    let records = vec![
        BorrowRecord {
            book_id: 3,
            username: "student".to_string(),
            due_date: today + Duration::days(10),
        },
        BorrowRecord {
            book_id: 5,
            username: "teacher".to_string(),
            due_date: today + Duration::days(25),
        },
        BorrowRecord {
            book_id: 9,
            username: "student".to_string(),
            due_date: today - Duration::days(2),
        },
    ];
    let records = records
        .into_iter()
        .filter(|r| r.book_id <= config.seed_count as i32)
        .collect();

    LibraryData {
        catalog: Catalog::new(books),
        ledger: Ledger::new(records),
        reservations: ReservationQueue::new(vec![]),
        users: UserDirectory::seeded(),
    }
}
