//! Identity endpoint

use axum::Json;

use crate::models::user::UserClaims;

use super::AuthenticatedUser;

/// Claims of the caller's verified token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Verified claims", body = UserClaims),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<UserClaims> {
    Json(claims)
}
