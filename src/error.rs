//! Error types for Librarian

use thiserror::Error;

/// Stable numeric codes reported alongside error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 3,
    NoSuchData = 4,
    ItemNotAvailable = 7,
    Duplicate = 8,
    BadValue = 18,
    NoActiveBorrow = 20,
    HasBorrowedBooks = 21,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Member with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Book {0} is not available")]
    OutOfStock(i64),

    #[error("No active borrow record for member {member_id} and book {book_id}")]
    NoActiveBorrow { member_id: i64, book_id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchData,
            AppError::DuplicateEmail(_) => ErrorCode::Duplicate,
            AppError::OutOfStock(_) => ErrorCode::ItemNotAvailable,
            AppError::NoActiveBorrow { .. } => ErrorCode::NoActiveBorrow,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::HasBorrowedBooks,
            AppError::Database(_) | AppError::Migration(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// Message shown to the operator. Storage failures are logged in full
    /// and reported generically.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error, operation not applied".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                "Database schema error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::OutOfStock(1).code(), ErrorCode::ItemNotAvailable);
        assert_eq!(
            AppError::DuplicateEmail("a@b.c".into()).code() as u32,
            8
        );
        assert_eq!(
            AppError::NoActiveBorrow { member_id: 1, book_id: 2 }.code(),
            ErrorCode::NoActiveBorrow
        );
    }

    #[test]
    fn test_database_error_is_reported_generically() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.user_message(), "Database error, operation not applied");
        assert_eq!(err.code(), ErrorCode::DbFailure);
    }

    #[test]
    fn test_business_errors_keep_their_message() {
        let err = AppError::DuplicateEmail("ann@example.com".into());
        assert_eq!(
            err.user_message(),
            "Member with email 'ann@example.com' already exists"
        );
    }
}
