//! Repository layer for database operations

pub mod books;
pub mod borrows;
pub mod members;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub members: members::MembersRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            members: members::MembersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Open a connection pool for the configured database.
///
/// An in-memory database lives and dies with its connection, so it is served
/// by exactly one connection that is never recycled.
pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<Sqlite>> {
    let mut options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!("Opened database pool for {}", config.url);
    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn migrate(pool: &Pool<Sqlite>) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Map a failed write on `members.email` to a duplicate-email error
pub(crate) fn map_email_conflict(err: sqlx::Error, email: &str) -> crate::error::AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            crate::error::AppError::DuplicateEmail(email.to_string())
        }
        _ => crate::error::AppError::Database(err),
    }
}
