//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE book_id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// All books in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY book_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Books whose title, author or category contains `keyword`, ignoring case.
    ///
    /// SQLite's LIKE and lower() fold ASCII letters only, so matching is done
    /// on Unicode-lowercased text here.
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Book>> {
        let keyword = keyword.to_lowercase();
        let books = self
            .list()
            .await?
            .into_iter()
            .filter(|book| book.matches(&keyword))
            .collect();
        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, category, stock, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.stock)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Overwrite the stock count
    pub async fn update_stock(&self, id: i64, stock: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("UPDATE books SET stock = ?1 WHERE book_id = ?2 RETURNING *")
            .bind(stock)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book that has no copies out on loan
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM books
            WHERE book_id = ?1
              AND NOT EXISTS (
                  SELECT 1 FROM borrow_records
                  WHERE book_id = ?1 AND return_date IS NULL
              )
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted == 0 {
            self.get_by_id(id).await?;
            return Err(AppError::Conflict(format!(
                "Book {} has copies out on loan",
                id
            )));
        }

        Ok(())
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
