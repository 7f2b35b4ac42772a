//! Admin-side catalog client.
//!
//! [`CatalogClient`] is the remote CRUD seam, [`Dialogs`] the confirmation and
//! notice seam. [`workflow::AdminWorkflow`] drives both against a
//! [`store::CatalogStore`].

pub mod store;
pub mod workflow;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    config::CatalogConfig,
    models::book::{Book, BookId, BookInput, DataEnvelope},
};

/// Failure of a remote catalog call
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// CRUD operations against the remote book collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Book>>;
    async fn create(&self, input: &BookInput) -> ClientResult<Book>;
    async fn update(&self, id: BookId, input: &BookInput) -> ClientResult<Book>;
    async fn delete(&self, id: BookId) -> ClientResult<()>;
}

/// A yes/no question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    pub fn delete_book() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            text: "This action will permanently delete the book.".to_string(),
            confirm_label: "Yes, delete it!".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

/// Outcome message shown after an admin action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success { title: String, text: String },
    Failure { title: String, text: String },
}

impl Notice {
    pub fn success(title: &str, text: &str) -> Self {
        Notice::Success {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn failure(title: &str, text: &str) -> Self {
        Notice::Failure {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure { .. })
    }
}

/// Modal prompts and notices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Block until the user answers; `true` means confirmed
    async fn confirm(&self, prompt: &Confirmation) -> bool;
    async fn notify(&self, notice: Notice);
}

/// [`CatalogClient`] over the server's REST API.
///
/// Responses are decoded from the `{ "data": ... }` envelope only.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` on every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(text);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let envelope = Self::check(response)
            .await?
            .json::<DataEnvelope<T>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list(&self) -> ClientResult<Vec<Book>> {
        let response = self.request(Method::GET, "/books").send().await?;
        Self::read_data(response).await
    }

    async fn create(&self, input: &BookInput) -> ClientResult<Book> {
        let response = self.request(Method::POST, "/books").json(input).send().await?;
        Self::read_data(response).await
    }

    async fn update(&self, id: BookId, input: &BookInput) -> ClientResult<Book> {
        let response = self
            .request(Method::PUT, &format!("/books/{}", id))
            .json(input)
            .send()
            .await?;
        Self::read_data(response).await
    }

    async fn delete(&self, id: BookId) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/books/{}", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
