//! Shared fixtures for in-crate tests

use std::sync::Arc;

use axum::{body::to_bytes, response::Response};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;

use crate::{
    api::AuthGate,
    config::{AppConfig, AuthConfig},
    models::user::{Role, UserClaims},
    repository::Repository,
    services::Services,
    AppState,
};

pub const TEST_SECRET: &str = "test-secret-value";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_cookie: "token".to_string(),
    }
}

pub fn test_gate() -> AuthGate {
    AuthGate::new(&test_auth_config())
}

/// State backed by a lazy pool; nothing connects until a query runs.
/// Must be called inside a tokio runtime.
pub fn test_state() -> AppState {
    let config = AppConfig {
        server: Default::default(),
        database: Default::default(),
        auth: test_auth_config(),
        logging: Default::default(),
        catalog: Default::default(),
    };
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy(&config.database.url)
        .unwrap();
    AppState {
        gate: AuthGate::new(&config.auth),
        config: Arc::new(config),
        services: Arc::new(Services::new(Repository::new(pool))),
    }
}

pub fn token_for(sub: &str, role: Role, ttl: Duration) -> String {
    UserClaims::new(sub, role, ttl).create_token(TEST_SECRET).unwrap()
}

/// Sign an arbitrary claims payload with the test secret
pub fn sign_payload(payload: &serde_json::Value) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
