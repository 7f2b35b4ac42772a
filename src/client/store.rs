//! Client-side cache of the remote book list

use crate::models::book::Book;

use super::ClientResult;

/// Identifies one fetch; only the most recently issued ticket may land
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Book list, loading flag and fetch sequencing.
///
/// Starts loading with an empty list. The list is replaced wholesale by each
/// accepted fetch and never patched locally.
#[derive(Debug)]
pub struct CatalogStore {
    books: Vec<Book>,
    loading: bool,
    latest: u64,
    last_error: Option<String>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            loading: true,
            latest: 0,
            last_error: None,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch, cleared by the next successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket(self.latest)
    }

    /// Apply a fetch result. Returns `false` if a newer fetch was issued
    /// meanwhile, in which case nothing changes.
    ///
    /// A failed fetch empties the list.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: ClientResult<Vec<Book>>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                "Discarding stale catalog fetch #{} (latest #{})",
                ticket.0,
                self.latest
            );
            return false;
        }

        match result {
            Ok(books) => {
                tracing::debug!("Catalog fetch #{} loaded {} books", ticket.0, books.len());
                self.books = books;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!("Catalog fetch #{} failed: {}", ticket.0, e);
                self.books.clear();
                self.last_error = Some(e.to_string());
            }
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;

    fn book(id: i32) -> Book {
        Book {
            id,
            title: Some(format!("Book {}", id)),
            author: None,
            category: None,
            available_copies: 0,
            total_copies: 0,
            isbn: None,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let store = CatalogStore::new();
        assert!(store.is_loading());
        assert!(store.books().is_empty());
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_success_replaces_list() {
        let mut store = CatalogStore::new();
        let ticket = store.begin_fetch();
        assert!(store.complete_fetch(ticket, Ok(vec![book(1), book(2)])));
        assert!(!store.is_loading());
        assert_eq!(store.books().len(), 2);

        let ticket = store.begin_fetch();
        assert!(store.is_loading());
        assert!(store.complete_fetch(ticket, Ok(vec![book(3)])));
        assert_eq!(store.books(), &[book(3)]);
    }

    #[test]
    fn test_failure_empties_list() {
        let mut store = CatalogStore::new();
        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Ok(vec![book(1)]));

        let ticket = store.begin_fetch();
        let failure = Err(ClientError::Decode("unexpected body".to_string()));
        assert!(store.complete_fetch(ticket, failure));
        assert!(store.books().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.last_error(), Some("Invalid response: unexpected body"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut store = CatalogStore::new();
        let older = store.begin_fetch();
        let newer = store.begin_fetch();
        assert!(older < newer);

        assert!(store.complete_fetch(newer, Ok(vec![book(2)])));
        assert!(!store.complete_fetch(older, Ok(vec![book(1)])));
        assert_eq!(store.books(), &[book(2)]);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut store = CatalogStore::new();
        let older = store.begin_fetch();
        let _newer = store.begin_fetch();
        assert!(!store.complete_fetch(older, Ok(vec![book(1)])));
        assert!(store.is_loading());
        assert!(store.books().is_empty());
    }
}
