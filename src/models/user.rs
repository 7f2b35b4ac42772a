//! Bearer token claims and roles

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Catalog roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Librarian,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Librarian => "librarian",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "librarian" => Ok(Role::Librarian),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// JWT Claims for authenticated users.
///
/// `role` keeps the issuer's string as-is. Only the `require_*` checks
/// interpret it, so a role name outside [`Role`] still verifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub role: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl UserClaims {
    /// Claims issued now and valid for `ttl`
    pub fn new(sub: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            role: role.as_str().to_string(),
            iat: Some(now.timestamp()),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token. Signature and `exp` are checked by `Validation::default()`.
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Known role, if the claim names one
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Require librarian or admin privileges
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.role().is_some_and(|role| role >= Role::Librarian) {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write books".to_string()))
        }
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_round_trip() {
        let claims = UserClaims::new("alice", Role::Librarian, Duration::hours(1));
        let token = claims.create_token(SECRET).unwrap();
        assert_eq!(UserClaims::from_token(&token, SECRET).unwrap(), claims);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = UserClaims::new("alice", Role::Admin, Duration::hours(1))
            .create_token(SECRET)
            .unwrap();
        assert!(UserClaims::from_token(&token, "another-secret").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = UserClaims::new("alice", Role::Admin, Duration::hours(-2))
            .create_token(SECRET)
            .unwrap();
        assert!(UserClaims::from_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_role_checks() {
        let reader = UserClaims::new("r", Role::Reader, Duration::hours(1));
        let librarian = UserClaims::new("l", Role::Librarian, Duration::hours(1));
        let admin = UserClaims::new("a", Role::Admin, Duration::hours(1));

        assert!(reader.require_librarian().is_err());
        assert!(librarian.require_librarian().is_ok());
        assert!(librarian.require_admin().is_err());
        assert!(admin.require_librarian().is_ok());
        assert!(admin.require_admin().is_ok());
    }

    #[test]
    fn test_unknown_role_has_no_rights() {
        let claims = UserClaims {
            sub: "u1".to_string(),
            role: "user".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: None,
        };
        assert_eq!(claims.role(), None);
        assert!(claims.require_librarian().is_err());
        assert!(claims.require_admin().is_err());
    }

    #[test]
    fn test_claims_without_iat_decode() {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "sub": "u1", "role": "admin", "exp": exp }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let claims = UserClaims::from_token(&token, SECRET).unwrap();
        assert_eq!(claims.iat, None);
        assert!(claims.is_admin());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("guest".parse::<Role>().is_err());
    }
}
