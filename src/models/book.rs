//! Book (catalog entry) model and the admin form draft.
//!
//! The wire format uses camelCase keys (`availableCopies`, `totalCopies`) and
//! accepts `_id` as an alias for `id`.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

pub type BookId = i32;

/// Catalog entry as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(alias = "_id")]
    pub id: BookId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available_copies: i32,
    #[serde(default)]
    pub total_copies: i32,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_copy_counts", skip_on_field_errors = true))]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    #[serde(default)]
    pub available_copies: i32,
    #[validate(range(min = 0, message = "Total copies cannot be negative"))]
    #[serde(default)]
    pub total_copies: i32,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

fn validate_copy_counts(input: &BookInput) -> Result<(), ValidationError> {
    if input.available_copies > input.total_copies {
        return Err(ValidationError::new("copies")
            .with_message(Cow::Borrowed("Available copies cannot exceed total copies")));
    }
    Ok(())
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring matched against title or author
    pub search: Option<String>,
}

/// Single documented response envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// OpenAPI shape of `DataEnvelope<Book>`
#[derive(ToSchema)]
pub struct BookEnvelope {
    pub data: Book,
}

/// OpenAPI shape of `DataEnvelope<Vec<Book>>`
#[derive(ToSchema)]
pub struct BookListEnvelope {
    pub data: Vec<Book>,
}

/// Editable staging copy of a book's fields, as typed into the admin form.
///
/// Every field is a plain string; an empty draft is the all-`""` default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: String,
    pub available_copies: String,
    pub total_copies: String,
    pub isbn: String,
    pub image: String,
}

impl BookDraft {
    /// Copy a book's editable fields. Missing optional fields and zero
    /// copy counts become `""`, which `to_input` reads back as zero.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone().unwrap_or_default(),
            author: book.author.clone().unwrap_or_default(),
            category: book.category.clone().unwrap_or_default(),
            available_copies: count_field(book.available_copies),
            total_copies: count_field(book.total_copies),
            isbn: book.isbn.clone().unwrap_or_default(),
            image: book.image.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse and validate the draft into a request body.
    ///
    /// Blank copy counts are read as zero.
    pub fn to_input(&self) -> Result<BookInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let available_copies = parse_count(&self.available_copies, "availableCopies", &mut errors);
        let total_copies = parse_count(&self.total_copies, "totalCopies", &mut errors);
        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let input = BookInput {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            category: non_blank(&self.category),
            available_copies,
            total_copies,
            isbn: non_blank(&self.isbn),
            image: non_blank(&self.image),
        };
        input.validate()?;
        Ok(input)
    }
}

fn parse_count(raw: &str, field: &'static str, errors: &mut ValidationErrors) -> i32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i32>() {
        Ok(n) => n,
        Err(_) => {
            errors.add(
                field,
                ValidationError::new("integer")
                    .with_message(Cow::Owned(format!("{} must be a whole number", field))),
            );
            0
        }
    }
}

fn count_field(count: i32) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
