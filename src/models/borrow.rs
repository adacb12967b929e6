//! Borrow record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Borrow record from database.
///
/// A record is created open (`return_date` unset) and closed exactly once.
/// References become `None` once the member or book they pointed to is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BorrowRecord {
    pub record_id: i64,
    pub member_id: Option<i64>,
    pub book_id: Option<i64>,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowStatus {
    NotReturned,
    Returned,
}

impl BorrowStatus {
    pub fn is_open(self) -> bool {
        self == BorrowStatus::NotReturned
    }
}

impl From<Option<DateTime<Utc>>> for BorrowStatus {
    fn from(return_date: Option<DateTime<Utc>>) -> Self {
        match return_date {
            Some(_) => BorrowStatus::Returned,
            None => BorrowStatus::NotReturned,
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowStatus::NotReturned => "Not returned",
            BorrowStatus::Returned => "Returned",
        };
        write!(f, "{}", label)
    }
}

/// Borrow record joined with the title of its book
#[derive(Debug, Clone, Serialize)]
pub struct BorrowDetail {
    pub record_id: i64,
    pub book_id: Option<i64>,
    pub book_title: Option<String>,
    pub status: BorrowStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_return_date() {
        assert_eq!(BorrowStatus::from(None), BorrowStatus::NotReturned);
        assert_eq!(BorrowStatus::from(Some(Utc::now())), BorrowStatus::Returned);
        assert!(BorrowStatus::NotReturned.is_open());
        assert_eq!(BorrowStatus::Returned.to_string(), "Returned");
    }
}
