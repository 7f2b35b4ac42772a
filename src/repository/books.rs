//! Book domain methods on Repository

use chrono::Utc;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId, BookInput},
};

impl Repository {
    /// List all books
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: BookId) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create book
    pub async fn books_create(&self, data: &BookInput) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, category, available_copies, total_copies, isbn, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(data.available_copies)
        .bind(data.total_copies)
        .bind(&data.isbn)
        .bind(&data.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every editable field of a book
    pub async fn books_update(&self, id: BookId, data: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, category = $4, available_copies = $5,
                total_copies = $6, isbn = $7, image = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(data.available_copies)
        .bind(data.total_copies)
        .bind(&data.isbn)
        .bind(&data.image)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete book
    pub async fn books_delete(&self, id: BookId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
