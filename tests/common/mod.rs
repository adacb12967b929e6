//! Shared helpers for integration tests
#![allow(dead_code)]

use librarian::{
    config::DatabaseConfig,
    models::{Book, BorrowRecord, CreateBook, CreateMember, Member},
    repository::{self, Repository},
    services::Services,
};

/// Services plus direct repository access over the same database
pub struct Library {
    pub services: Services,
    pub repository: Repository,
}

/// Fresh in-memory database with the schema applied
pub async fn library() -> Library {
    open("sqlite::memory:", 1).await
}

pub async fn services() -> Services {
    library().await.services
}

pub async fn open(url: &str, max_connections: u32) -> Library {
    let config = DatabaseConfig {
        url: url.to_string(),
        max_connections,
        ..DatabaseConfig::default()
    };
    let pool = repository::connect(&config)
        .await
        .expect("Failed to open test database");
    repository::migrate(&pool).await.expect("Failed to migrate");

    let repository = Repository::new(pool);
    Library {
        services: Services::new(repository.clone()),
        repository,
    }
}

pub async fn add_member(services: &Services, name: &str, email: &str) -> Member {
    services
        .members
        .add_member(CreateMember {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
        .expect("Failed to add member")
}

pub async fn add_book(services: &Services, title: &str, author: &str, category: &str, stock: i64) -> Book {
    services
        .catalog
        .add_book(CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            stock,
        })
        .await
        .expect("Failed to add book")
}

pub async fn stock(services: &Services, book_id: i64) -> i64 {
    services
        .catalog
        .get_book(book_id)
        .await
        .expect("Failed to get book")
        .stock
}

pub async fn open_borrows(repository: &Repository, book_id: i64) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM borrow_records WHERE book_id = ?1 AND return_date IS NULL",
    )
    .bind(book_id)
    .fetch_one(&repository.pool)
    .await
    .expect("Failed to count open borrows")
}

pub async fn record(repository: &Repository, record_id: i64) -> BorrowRecord {
    sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrow_records WHERE record_id = ?1")
        .bind(record_id)
        .fetch_one(&repository.pool)
        .await
        .expect("Failed to get borrow record")
}
