//! API integration tests, run against the router in-process

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelfmark_server::{
    config::{AppConfig, AuthConfig, CatalogConfig, LoggingConfig, ServerConfig},
    create_router,
    models::{
        book::{Book, Category},
        borrow::BorrowRecord,
    },
    services::Services,
    store::{Catalog, Ledger, LibraryData, ReservationQueue, Store, UserDirectory},
    AppState,
};

fn book(id: i32, title: &str, author: &str, category: Category, available: bool) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        category,
        cover_image_url: "/placeholder.svg".to_string(),
        is_available: available,
        description: format!("Description of {}", title),
        isbn: format!("978-0-0000-000{}-0", id),
        publication_year: 2000 + id,
    }
}

/// App with a small fixed catalog: books 4 and 5 are borrowed, the borrow
/// of book 4 is two days overdue.
fn test_app() -> Router {
    let today = Utc::now().date_naive();
    let data = LibraryData {
        catalog: Catalog::new(vec![
            book(5, "Whispers of Midnight Odyssey", "Casey Garcia", Category::Fantasy, false),
            book(4, "The Quantum Paradox", "Jordan Miller", Category::ScienceFiction, false),
            book(3, "A Golden Garden", "Taylor Jones", Category::Fantasy, true),
            book(2, "Chronicles of Lost Throne", "Alex Smith", Category::History, true),
            book(1, "My Silent River", "Morgan Davis", Category::Fantasy, true),
        ]),
        ledger: Ledger::new(vec![
            BorrowRecord {
                book_id: 4,
                username: "student".to_string(),
                due_date: today - Duration::days(2),
            },
            BorrowRecord {
                book_id: 5,
                username: "teacher".to_string(),
                due_date: today + Duration::days(25),
            },
        ]),
        reservations: ReservationQueue::new(vec![]),
        users: UserDirectory::seeded(),
    };

    let config = AppConfig {
        server: ServerConfig::default(),
        auth: AuthConfig::default(),
        logging: LoggingConfig::default(),
        catalog: CatalogConfig {
            seed_count: 0,
            books_per_page: 20,
        },
    };

    let services = Services::new(Store::new(data), config.auth.clone());
    create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("invalid JSON body")
    };
    (status, body)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: Method, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        send_json(
            Method::POST,
            "/api/v1/auth/login",
            None,
            json!({ "username": username, "password": "password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login_and_me() {
    let app = test_app();
    let (status, body) = send(
        &app,
        send_json(
            Method::POST,
            "/api/v1/auth/login",
            None,
            json!({ "username": "teacher", "password": "password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "Teacher");

    let token = body["token"].as_str().unwrap();
    let (status, me) = send(&app, get("/api/v1/auth/me", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "teacher");
    assert_eq!(me["name"], "Jane Smith");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = test_app();
    let (status, body) = send(
        &app,
        send_json(
            Method::POST,
            "/api/v1/auth/login",
            None,
            json!({ "username": "teacher", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = test_app();
    let request = json!({
        "username": "student",
        "password": "pw",
        "name": "Imposter",
        "role": "Student"
    });
    let (status, _) = send(
        &app,
        send_json(Method::POST, "/api/v1/auth/register", None, request),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = test_app();
    let (status, _) = send(&app, get("/api/v1/borrows/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_books_with_filters_and_pagination() {
    let app = test_app();

    let (status, body) = send(&app, get("/api/v1/books", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["total_pages"], 1);
    // Catalog order: most recently added first
    assert_eq!(body["books"][0]["id"], 5);

    let (_, filtered) = send(
        &app,
        get("/api/v1/books?category=Fantasy&availability=available", None),
    )
    .await;
    assert_eq!(filtered["total"], 2);

    let (_, searched) = send(&app, get("/api/v1/books?search=quantum", None)).await;
    assert_eq!(searched["total"], 1);
    assert_eq!(searched["books"][0]["id"], 4);

    let (_, paged) = send(&app, get("/api/v1/books?page=2&per_page=2", None)).await;
    assert_eq!(paged["total_pages"], 3);
    assert_eq!(paged["books"].as_array().unwrap().len(), 2);
    assert_eq!(paged["books"][0]["id"], 3);

    let (_, empty) = send(&app, get("/api/v1/books?search=no+such+title", None)).await;
    assert_eq!(empty["total"], 0);
    assert_eq!(empty["total_pages"], 1);
    assert_eq!(empty["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_categories_has_all_sentinel_first() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/v1/books/categories", None)).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories[0], "All");
    assert!(categories.contains(&json!("Fantasy")));
}

#[tokio::test]
async fn test_book_management_is_librarian_only() {
    let app = test_app();
    let student_token = login(&app, "student").await;
    let librarian_token = login(&app, "librarian").await;

    let fields = json!({
        "title": "A Hidden Legacy",
        "author": "Riley Martinez",
        "category": "Mystery",
        "description": "A mystery."
    });

    let (status, _) = send(
        &app,
        send_json(Method::POST, "/api/v1/books", Some(&student_token), fields.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        send_json(Method::POST, "/api/v1/books", Some(&librarian_token), fields),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["book"]["id"], 6);
    assert_eq!(created["book"]["is_available"], true);
    assert_eq!(created["book"]["cover_image_url"], "/placeholder.svg");
    assert_eq!(created["notification"]["level"], "success");

    let (status, fetched) = send(&app, get("/api/v1/books/6", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "A Hidden Legacy");
}

#[tokio::test]
async fn test_borrow_return_cycle() {
    let app = test_app();
    let token = login(&app, "teacher").await;

    let (status, borrowed) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/1/borrow", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let expected_due = (Utc::now().date_naive() + Duration::days(30)).to_string();
    assert_eq!(borrowed["due_date"], expected_due);

    let (_, book) = send(&app, get("/api/v1/books/1", None)).await;
    assert_eq!(book["is_available"], false);

    // Second borrow of the same book conflicts
    let (status, _) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/1/borrow", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, returned) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/1/return", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["notification"]["level"], "info");

    let (_, book) = send(&app, get("/api/v1/books/1", None)).await;
    assert_eq!(book["is_available"], true);
}

#[tokio::test]
async fn test_reserve_only_unavailable_books() {
    let app = test_app();
    let token = login(&app, "student").await;

    let (status, _) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/1/reserve", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, reserved) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/4/reserve", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reserved["reservation"]["book_id"], 4);

    let (status, _) = send(
        &app,
        send_json(Method::POST, "/api/v1/books/4/reserve", Some(&token), Value::Null),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_teacher_reservation_has_priority() {
    let app = test_app();
    let student_token = login(&app, "student").await;
    let teacher_token = login(&app, "teacher").await;

    for token in [&student_token, &teacher_token] {
        let (status, _) = send(
            &app,
            send_json(Method::POST, "/api/v1/books/5/reserve", Some(token), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, queue) = send(&app, get("/api/v1/books/5/reservations", Some(&student_token))).await;
    assert_eq!(status, StatusCode::OK);
    let order: Vec<&str> = queue
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["username"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["teacher", "student"]);
}

#[tokio::test]
async fn test_delete_borrowed_book_conflicts() {
    let app = test_app();
    let token = login(&app, "librarian").await;

    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri("/api/v1/books/4")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "BookBorrowed");

    let (status, _) = send(&app, get("/api/v1/books/4", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unborrowed_book() {
    let app = test_app();
    let token = login(&app, "librarian").await;

    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::DELETE)
            .uri("/api/v1/books/2")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["level"], "info");

    let (status, _) = send(&app, get("/api/v1/books/2", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_list_is_librarian_only() {
    let app = test_app();
    let student_token = login(&app, "student").await;
    let librarian_token = login(&app, "librarian").await;

    let (status, _) = send(&app, get("/api/v1/users", Some(&student_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, get("/api/v1/users", Some(&librarian_token))).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    let student = users.iter().find(|u| u["username"] == "student").unwrap();
    assert_eq!(student["active_borrows"], 1);
}

#[tokio::test]
async fn test_dashboard_reports_overdue_borrow() {
    let app = test_app();
    let token = login(&app, "student").await;

    let (status, body) = send(&app, get("/api/v1/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_books"], 5);
    assert_eq!(body["stats"]["borrowed_books"], 2);
    assert_eq!(body["stats"]["available_books"], 3);
    assert_eq!(body["stats"]["overdue_books"], 1);

    // Book 4's borrow is two days past due for this user
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["level"], "warning");
    assert!(notifications[0]["message"]
        .as_str()
        .unwrap()
        .contains("The Quantum Paradox"));

    // The teacher has no overdue borrows
    let teacher_token = login(&app, "teacher").await;
    let (_, teacher_body) = send(&app, get("/api/v1/dashboard", Some(&teacher_token))).await;
    assert!(teacher_body["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_my_borrows_includes_flags() {
    let app = test_app();
    let token = login(&app, "student").await;

    let (status, body) = send(&app, get("/api/v1/borrows/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let borrows = body.as_array().unwrap();
    assert_eq!(borrows.len(), 1);
    assert_eq!(borrows[0]["book"]["id"], 4);
    assert_eq!(borrows[0]["is_overdue"], true);
    assert_eq!(borrows[0]["is_due_soon"], false);
}
