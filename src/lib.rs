//! Librarian Library Management System
//!
//! Members, books and borrow records kept in an embedded SQLite database,
//! with stock accounting for borrow and return, driven from a menu shell.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Connect to the configured database, bring its schema up to date and
/// build the services on top of it
pub async fn open(config: &AppConfig) -> AppResult<Services> {
    let pool = repository::connect(&config.database).await?;
    repository::migrate(&pool).await?;
    Ok(Services::new(Repository::new(pool)))
}
