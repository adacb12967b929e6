//! Loan management service

use crate::{
    error::{AppError, AppResult},
    models::borrow::BorrowRecord,
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow one copy of a book
    pub async fn borrow_book(&self, member_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        match self.repository.borrows.borrow(member_id, book_id).await {
            Ok(record) => {
                tracing::info!(
                    "Member id={} borrowed book id={} (record id={})",
                    member_id,
                    book_id,
                    record.record_id
                );
                Ok(record)
            }
            Err(e @ AppError::OutOfStock(_)) => {
                tracing::warn!("Member id={} asked for unavailable book id={}", member_id, book_id);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Return a borrowed book
    pub async fn return_book(&self, member_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        match self.repository.borrows.return_book(member_id, book_id).await {
            Ok(record) => {
                tracing::info!(
                    "Member id={} returned book id={} (record id={})",
                    member_id,
                    book_id,
                    record.record_id
                );
                Ok(record)
            }
            Err(e @ AppError::NoActiveBorrow { .. }) => {
                tracing::warn!(
                    "No open borrow to return for member id={} and book id={}",
                    member_id,
                    book_id
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Count open borrow records
    pub async fn count_open(&self) -> AppResult<i64> {
        self.repository.borrows.count_open().await
    }
}
