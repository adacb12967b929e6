//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    /// Copies currently on the shelf, never negative
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Substring match on title, author or category against an already
    /// lowercased keyword
    pub fn matches(&self, keyword: &str) -> bool {
        [&self.title, &self.author, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(keyword))
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author: String,
    pub category: String,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i64,
}
