//! Admin catalog management: create, edit and delete with refresh-after-write

use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    models::book::{Book, BookDraft, BookId},
    search::filter_books,
};

use super::{store::CatalogStore, CatalogClient, ClientError, Confirmation, Dialogs, Notice};

/// Which form, if any, is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(BookId),
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Remote call failed: {0}")]
    Remote(#[from] ClientError),

    #[error("No form is open")]
    FormClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Owns the catalog cache and the form draft, and talks to the remote
/// collection through `C`.
///
/// Every successful mutation is followed by a full re-fetch; the local list
/// is never patched.
pub struct AdminWorkflow<C, D> {
    client: C,
    dialogs: D,
    store: CatalogStore,
    draft: BookDraft,
    mode: FormMode,
}

impl<C: CatalogClient, D: Dialogs> AdminWorkflow<C, D> {
    pub fn new(client: C, dialogs: D) -> Self {
        Self {
            client,
            dialogs,
            store: CatalogStore::new(),
            draft: BookDraft::default(),
            mode: FormMode::Closed,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    /// Form fields, for the caller to edit in place
    pub fn draft_mut(&mut self) -> &mut BookDraft {
        &mut self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_target(&self) -> Option<BookId> {
        match self.mode {
            FormMode::Edit(id) => Some(id),
            _ => None,
        }
    }

    /// The cached list narrowed by `query`
    pub fn visible_books(&self, query: &str) -> Vec<Book> {
        filter_books(self.store.books(), query)
    }

    /// Reload the full list. Failures leave an empty list and are not returned.
    pub async fn fetch_all(&mut self) {
        let ticket = self.store.begin_fetch();
        let result = self.client.list().await;
        self.store.complete_fetch(ticket, result);
    }

    pub fn open_create(&mut self) {
        self.draft = BookDraft::default();
        self.mode = FormMode::Create;
    }

    pub fn open_edit(&mut self, book: &Book) {
        self.draft = BookDraft::from_book(book);
        self.mode = FormMode::Edit(book.id);
    }

    pub fn close(&mut self) {
        self.draft = BookDraft::default();
        self.mode = FormMode::Closed;
    }

    /// Create or update from the draft, depending on the open form.
    ///
    /// On success the draft is cleared, the list re-fetched once and the form
    /// closed. On failure the form stays open with the draft intact.
    pub async fn submit(&mut self) -> Result<Book, WorkflowError> {
        let target = match self.mode {
            FormMode::Closed => return Err(WorkflowError::FormClosed),
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        };

        let input = match self.draft.to_input() {
            Ok(input) => input,
            Err(errors) => {
                self.dialogs
                    .notify(Notice::failure("Invalid book", &errors.to_string()))
                    .await;
                return Err(errors.into());
            }
        };

        let result = match target {
            Some(id) => self.client.update(id, &input).await,
            None => self.client.create(&input).await,
        };

        match result {
            Ok(book) => {
                self.draft = BookDraft::default();
                self.fetch_all().await;
                self.mode = FormMode::Closed;
                Ok(book)
            }
            Err(e) => {
                tracing::error!("Saving book failed: {}", e);
                self.dialogs
                    .notify(Notice::failure("Error", "Something went wrong while saving."))
                    .await;
                Err(e.into())
            }
        }
    }

    /// Delete after explicit confirmation. A declined prompt changes nothing.
    pub async fn delete(&mut self, id: BookId) -> Result<DeleteOutcome, WorkflowError> {
        if !self.dialogs.confirm(&Confirmation::delete_book()).await {
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.client.delete(id).await {
            Ok(()) => {
                self.fetch_all().await;
                self.dialogs
                    .notify(Notice::success("Deleted!", "The book has been deleted."))
                    .await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                tracing::error!("Deleting book {} failed: {}", id, e);
                self.dialogs
                    .notify(Notice::failure("Error", "Something went wrong while deleting."))
                    .await;
                Err(e.into())
            }
        }
    }
}
