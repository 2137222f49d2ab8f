//! User repository.
//!
//! Password hashes and refresh tokens never leave this crate inside a
//! [`User`]; callers that need them ask for a [`StoredUser`].

use bistro_core::{User, UserSummary};
use chrono::Utc;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// A user row together with its credentials.
#[derive(Debug, Clone, FromRow)]
pub struct StoredUser {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
    pub refresh_token: Option<String>,
}

/// Repository for staff accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creator summary embedded in order details.
    pub async fn find_summary(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<UserSummary>> {
        let summary = sqlx::query_as::<_, UserSummary>(
            "SELECT id, first_name, last_name, email, role FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(summary)
    }

    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Looks a user up by email, with credentials. Emails are stored lowercased.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<StoredUser>> {
        let user = sqlx::query_as::<_, StoredUser>("SELECT * FROM users WHERE email = ?1")
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_stored(&self, id: &str) -> DbResult<Option<StoredUser>> {
        let user = sqlx::query_as::<_, StoredUser>("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Inserts a new account.
    ///
    /// ## Errors
    /// `UniqueViolation` on `users.email` when the email is taken.
    pub async fn insert(&self, user: &User, password_hash: &str) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, role = ?user.role, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (
                id, first_name, last_name, email, phone, password_hash, role,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.trim().to_lowercase())
        .bind(&user.phone)
        .bind(password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates the self-service profile fields (names and phone).
    pub async fn update_profile(&self, user: &User) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name = ?2,
                last_name = ?3,
                phone = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", &user.id));
        }

        Ok(())
    }

    /// Stores the current refresh token, or clears it on logout.
    pub async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET refresh_token = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(token)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use crate::DbError;

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let db = test_db().await;
        let user = seed_user(&db, "Sam@Bistro.test").await;

        let stored = db.users().find_by_email("sam@bistro.test").await.unwrap().unwrap();
        assert_eq!(stored.user.id, user.id);
        assert_eq!(stored.user.email, "sam@bistro.test");
        assert_eq!(stored.password_hash, "not-a-real-hash");
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let mut user = seed_user(&db, "dup@bistro.test").await;
        user.id = crate::repository::generate_id();
        let err = db.users().insert(&user, "hash").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "users.email"));
    }

    #[tokio::test]
    async fn test_refresh_token_set_and_cleared() {
        let db = test_db().await;
        let user = seed_user(&db, "rt@bistro.test").await;

        db.users().set_refresh_token(&user.id, Some("token-1")).await.unwrap();
        let stored = db.users().find_stored(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("token-1"));

        db.users().set_refresh_token(&user.id, None).await.unwrap();
        let stored = db.users().find_stored(&user.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_summary_via_connection() {
        let db = test_db().await;
        let user = seed_user(&db, "summary@bistro.test").await;
        let mut conn = db.acquire().await.unwrap();
        let summary = crate::UserRepository::find_summary(&mut conn, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.first_name, "Sam");
    }
}
