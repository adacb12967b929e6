//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book with its initial stock
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!("Added book id={} with stock {}", created.book_id, created.stock);
        Ok(created)
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Search books by keyword in title, author or category
    pub async fn search_books(&self, keyword: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books.search(keyword).await?;
        tracing::debug!("Search for {:?} matched {} books", keyword, books.len());
        Ok(books)
    }

    /// Set the number of copies on the shelf
    pub async fn update_book_stock(&self, id: i64, stock: i64) -> AppResult<Book> {
        if stock < 0 {
            return Err(AppError::Validation("Stock must not be negative".to_string()));
        }
        let previous = self.get_book(id).await?.stock;
        let updated = self.repository.books.update_stock(id, stock).await?;
        tracing::info!("Stock of book id={} changed from {} to {}", id, previous, stock);
        Ok(updated)
    }

    /// Delete a book. Refused while copies are out on loan.
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Count books
    pub async fn count(&self) -> AppResult<i64> {
        self.repository.books.count().await
    }
}
