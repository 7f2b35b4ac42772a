//! Catalog management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookId, BookInput},
    repository::Repository,
    search::filter_books,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, optionally narrowed by a title/author search
    pub async fn list_books(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        let books = self.repository.books_list().await?;
        Ok(match search {
            Some(query) => filter_books(&books, query),
            None => books,
        })
    }

    pub async fn get_book(&self, id: BookId) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    /// Create a book. Copy counts are checked before anything is written.
    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        input.validate()?;
        let created = self.repository.books_create(&input).await?;
        tracing::info!("Catalog create: book id={}", created.id);
        Ok(created)
    }

    pub async fn update_book(&self, id: BookId, input: BookInput) -> AppResult<Book> {
        input.validate()?;
        let updated = self.repository.books_update(id, &input).await?;
        tracing::info!("Catalog update: book id={}", id);
        Ok(updated)
    }

    pub async fn delete_book(&self, id: BookId) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }
}
