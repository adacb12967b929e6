//! Borrow records repository: stock accounting for borrow and return
//!
//! Borrow and return each touch a book and a borrow record. Both run as a
//! single transaction whose first statement is a guarded write, so SQLite
//! hands out its write lock before anything is read and concurrent callers
//! serialise instead of racing on a stale stock value. Every early return
//! drops the transaction, which rolls it back.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowDetail, BorrowRecord, BorrowStatus},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Take one copy of a book off the shelf and open a borrow record for it
    pub async fn borrow(&self, member_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query("UPDATE books SET stock = stock - 1 WHERE book_id = ?1 AND stock >= 1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if taken == 0 {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE book_id = ?1")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;

            return Err(if exists > 0 {
                AppError::OutOfStock(book_id)
            } else {
                AppError::NotFound(format!("Book with id {} not found", book_id))
            });
        }

        let member: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE member_id = ?1")
            .bind(member_id)
            .fetch_one(&mut *tx)
            .await?;

        if member == 0 {
            return Err(AppError::NotFound(format!(
                "Member with id {} not found",
                member_id
            )));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (member_id, book_id, borrow_date, return_date)
            VALUES (?1, ?2, ?3, NULL)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Close the oldest open borrow record for (member, book) and put the
    /// copy back on the shelf.
    ///
    /// The record is closed with a conditional UPDATE, so a record can only
    /// ever be closed once and the stock is incremented once per record.
    pub async fn return_book(&self, member_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET return_date = ?3
            WHERE return_date IS NULL
              AND record_id = (
                  SELECT record_id FROM borrow_records
                  WHERE member_id = ?1 AND book_id = ?2 AND return_date IS NULL
                  ORDER BY record_id
                  LIMIT 1
              )
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NoActiveBorrow { member_id, book_id })?;

        let restocked = sqlx::query("UPDATE books SET stock = stock + 1 WHERE book_id = ?1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if restocked != 1 {
            return Err(AppError::Internal(format!(
                "Open borrow record {} references missing book {}",
                record.record_id, book_id
            )));
        }

        tx.commit().await?;

        Ok(record)
    }

    /// Borrow history of a member joined with book titles, oldest first
    pub async fn get_member_borrows(&self, member_id: i64) -> AppResult<Vec<BorrowDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT r.record_id, r.book_id, b.title AS book_title, r.return_date
            FROM borrow_records r
            LEFT JOIN books b ON b.book_id = r.book_id
            WHERE r.member_id = ?1
            ORDER BY r.record_id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        let details = rows
            .into_iter()
            .map(|row| {
                let return_date: Option<DateTime<Utc>> = row.get("return_date");
                BorrowDetail {
                    record_id: row.get("record_id"),
                    book_id: row.get("book_id"),
                    book_title: row.get("book_title"),
                    status: BorrowStatus::from(return_date),
                }
            })
            .collect();

        Ok(details)
    }

    /// Count open borrow records
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE return_date IS NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
