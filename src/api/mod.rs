//! API handlers for catalog REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::AuthConfig, error::AuthRejection, models::user::UserClaims, AppState};

/// Token discovery and verification for gated routes
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
    cookie_name: Arc<str>,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: Arc::from(config.jwt_secret.as_str()),
            cookie_name: Arc::from(config.token_cookie.as_str()),
        }
    }

    /// Cookie first, then `Authorization: Bearer <token>`. Empty values count as absent.
    pub fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(&self.cookie_name) {
            if !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }

        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    pub fn verify(&self, token: &str) -> Result<UserClaims, AuthRejection> {
        UserClaims::from_token(token, &self.secret).map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e.kind());
            AuthRejection::Forbidden
        })
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserClaims, AuthRejection> {
        let token = self.extract_token(headers).ok_or(AuthRejection::Unauthenticated)?;
        self.verify(&token)
    }
}

/// Middleware: verify the request's token and attach its claims, or reject
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let claims = state.gate.authenticate(request.headers())?;
    tracing::debug!(sub = %claims.sub, role = %claims.role, "Token verified");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Claims attached by [`auth_gate`]
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserClaims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books))
        .route("/books/:id", get(books::get_book));

    let gated = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/books", post(books::create_book))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

    let api_v1 = public.merge(gated).with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
