//! User service: registration, login, logout and profile updates.

use std::sync::Arc;

use bistro_core::input::{LoginInput, RegisterUserInput, UpdateProfileInput};
use bistro_core::User;
use bistro_db::{generate_id, Database};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, Actor, JwtManager};
use crate::error::{ApiError, ApiResult};

/// Returned by a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Staff account operations.
#[derive(Clone)]
pub struct UserService {
    db: Database,
    jwt: Arc<JwtManager>,
}

impl UserService {
    pub fn new(db: Database, jwt: Arc<JwtManager>) -> Self {
        UserService { db, jwt }
    }

    /// Creates an account.
    ///
    /// ## Errors
    /// `BadRequest("User already exists")` when the email is taken.
    pub async fn register(&self, input: RegisterUserInput) -> ApiResult<User> {
        let email = input.email.trim().to_lowercase();
        if self.db.users().find_by_email(&email).await?.is_some() {
            return Err(ApiError::bad_request("User already exists"));
        }

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now();
        let user = User {
            id: generate_id(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email,
            phone: input.phone,
            role: input.role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.db.users().insert(&user, &password_hash).await?;
        info!(user_id = %user.id, email = %user.email, role = ?user.role, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, input: LoginInput) -> ApiResult<LoginResult> {
        let invalid = || ApiError::unauthenticated("Invalid email or password");

        let Some(stored) = self.db.users().find_by_email(&input.email).await? else {
            warn!(email = %input.email, "Login for unknown email");
            return Err(invalid());
        };
        if !verify_password(&input.password, &stored.password_hash) {
            warn!(user_id = %stored.user.id, "Login with wrong password");
            return Err(invalid());
        }

        let access_token = self.jwt.generate_access_token(&stored.user)?;
        let refresh_token = self.jwt.generate_refresh_token(&stored.user)?;
        self.db
            .users()
            .set_refresh_token(&stored.user.id, Some(&refresh_token))
            .await?;

        info!(user_id = %stored.user.id, "User logged in");

        Ok(LoginResult {
            user: stored.user,
            access_token,
            refresh_token,
        })
    }

    /// Clears the stored refresh token.
    pub async fn logout(&self, actor: &Actor) -> ApiResult<()> {
        self.db.users().set_refresh_token(&actor.id, None).await?;
        info!(user_id = %actor.id, "User logged out");
        Ok(())
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        Ok(self.db.users().list().await?)
    }

    /// Applies the provided profile fields to the caller's own account.
    pub async fn update_profile(&self, actor: &Actor, input: UpdateProfileInput) -> ApiResult<User> {
        let mut user = self
            .db
            .users()
            .get_by_id(&actor.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User", &actor.id))?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = input.phone {
            user.phone = Some(phone);
        }
        user.updated_at = Utc::now();

        self.db.users().update_profile(&user).await?;
        Ok(user)
    }
}
