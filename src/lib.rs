//! Library catalog server
//!
//! A REST JSON API over the book catalog with a bearer-token gate in front of
//! every mutating endpoint, plus the client-side admin workflow that manages
//! the catalog through that API.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub gate: api::AuthGate,
}
