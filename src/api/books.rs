//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookEnvelope, BookId, BookInput, BookListEnvelope, BookQuery, DataEnvelope},
    AppState,
};

use super::AuthenticatedUser;

/// List books, optionally filtered by title/author
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = BookListEnvelope)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<DataEnvelope<Vec<Book>>>> {
    let books = state.services.catalog.list_books(query.search.as_deref()).await?;
    Ok(Json(DataEnvelope::new(books)))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookEnvelope),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> AppResult<Json<DataEnvelope<Book>>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(DataEnvelope::new(book)))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = BookEnvelope),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token or insufficient rights")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<DataEnvelope<Book>>)> {
    claims.require_librarian()?;

    let created = state.services.catalog.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(created))))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = BookEnvelope),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<BookId>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<DataEnvelope<Book>>> {
    claims.require_librarian()?;

    let updated = state.services.catalog.update_book(id, input).await?;
    Ok(Json(DataEnvelope::new(updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<BookId>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
