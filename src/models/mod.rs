//! Data models for the catalog

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookId, BookInput};
pub use user::{Role, UserClaims};
