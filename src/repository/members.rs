//! Members repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::map_email_conflict;
use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE member_id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Check if email already exists (exact match)
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let count: i64 = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE email = ?1 AND member_id != ?2")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE email = ?1")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(count > 0)
    }

    /// Create a new member. The unique index on email backs up any pre-check.
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &member.email))
    }

    /// Replace a member's email
    pub async fn update_email(&self, id: i64, email: &str) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("UPDATE members SET email = ?1 WHERE member_id = ?2 RETURNING *")
            .bind(email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_email_conflict(e, email))?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Delete a member who holds no borrowed books.
    ///
    /// The open-borrow guard is part of the DELETE itself so a concurrent
    /// borrow cannot slip in between check and delete.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM members
            WHERE member_id = ?1
              AND NOT EXISTS (
                  SELECT 1 FROM borrow_records
                  WHERE member_id = ?1 AND return_date IS NULL
              )
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted == 0 {
            // Tell "missing" apart from "still borrowing"
            self.get_by_id(id).await?;
            return Err(AppError::Conflict(format!(
                "Member {} still has borrowed books",
                id
            )));
        }

        Ok(())
    }

    /// Count members
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
