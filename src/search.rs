//! In-memory title/author search over a book list

use crate::models::book::Book;

/// Books whose title or author contains `query`, ignoring case.
///
/// A blank query returns the list unchanged. Order is preserved.
pub fn filter_books(books: &[Book], query: &str) -> Vec<Book> {
    if query.trim().is_empty() {
        return books.to_vec();
    }
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| matches(book.title.as_deref(), &needle) || matches(book.author.as_deref(), &needle))
        .cloned()
        .collect()
}

fn matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}
