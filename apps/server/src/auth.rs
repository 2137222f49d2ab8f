//! JWT authentication module.
//!
//! Handles token generation and validation, password hashing, and the
//! [`Actor`] extractor that protected handlers take as an argument.
//!
//! ## Request Flow
//! ```text
//! Authorization: Bearer <jwt>      Cookie: accessToken=<jwt>
//!            └──────────────┬──────────────┘
//!                           ▼
//!              JwtManager::validate_access_token
//!                           │ claims.sub
//!                           ▼
//!              users row still exists? ──no──► 401
//!                           │
//!                           ▼
//!              Actor { id, email, role }
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use bistro_core::{Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

/// Cookie carrying the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Token type ("access" or "refresh")
    pub token_type: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    /// Generate an access token.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ApiError> {
        self.generate(user, ACCESS, self.access_lifetime_secs)
    }

    /// Generate a refresh token.
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, ApiError> {
        self.generate(user, REFRESH, self.refresh_lifetime_secs)
    }

    fn generate(&self, user: &User, token_type: &str, lifetime_secs: i64) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_secs);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate {} token: {}", token_type, e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ApiError::unauthenticated(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Validate that a token is an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != ACCESS {
            return Err(ApiError::unauthenticated("Expected access token"));
        }

        Ok(claims)
    }

    /// Validate that a token is a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != REFRESH {
            return Err(ApiError::unauthenticated("Expected refresh token"));
        }

        Ok(claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Finds `name=value` in a `Cookie` header.
fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

// =============================================================================
// Passwords
// =============================================================================

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Actor extractor
// =============================================================================

/// The authenticated staff member making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(actor) = parts.extensions.get::<Actor>() {
            return Ok(actor.clone());
        }

        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer_token);
        let cookie = parts
            .headers
            .get(COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| extract_cookie(h, ACCESS_TOKEN_COOKIE));

        let Some(token) = bearer.or(cookie) else {
            return Err(ApiError::unauthenticated("Unauthorized request"));
        };

        let claims = state.jwt.validate_access_token(token).map_err(|e| {
            warn!(uri = %parts.uri, error = %e, "Rejected access token");
            e
        })?;

        let user = state
            .db
            .users()
            .get_by_id(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("Invalid access token"))?;

        let actor = Actor {
            id: user.id,
            email: user.email,
            role: user.role,
        };
        parts.extensions.insert(actor.clone());

        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: "user-001".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Cook".to_string(),
            email: "ada@bistro.test".to_string(),
            phone: None,
            role: Role::Manager,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret".to_string(), 3600, 86400);

        let access_token = manager.generate_access_token(&user()).unwrap();
        let claims = manager.validate_access_token(&access_token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.email, "ada@bistro.test");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_wrong_token_type() {
        let manager = JwtManager::new("test-secret".to_string(), 3600, 86400);

        let refresh_token = manager.generate_refresh_token(&user()).unwrap();
        assert!(manager.validate_refresh_token(&refresh_token).is_ok());
        assert!(manager.validate_access_token(&refresh_token).is_err());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = JwtManager::new("one-secret".to_string(), 3600, 86400);
        let verifier = JwtManager::new("another-secret".to_string(), 3600, 86400);

        let token = issuer.generate_access_token(&user()).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_sources() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);

        let header = "theme=dark; accessToken=abc.def; refreshToken=xyz";
        assert_eq!(extract_cookie(header, "accessToken"), Some("abc.def"));
        assert_eq!(extract_cookie(header, "missing"), None);
    }

    #[test]
    fn test_password_hash_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-phc-string"));
    }
}
