//! # Database Errors
//!
//! Error type for everything that talks to SQLite.
//!
//! ## Constraint Classification
//! ```text
//! sqlx::Error::Database("UNIQUE constraint failed: orders.order_number")
//!      │
//!      ▼
//! DbError::UniqueViolation { field: "orders.order_number" }
//!      │
//!      ▼  (bistro-server)
//! 400 "Unique constraint failed"
//! ```
//!
//! Anything that is not a recognised constraint becomes `QueryFailed` or
//! `Internal` and surfaces as a 500.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// UNIQUE constraint violation (duplicate email, table number, ...).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// FOREIGN KEY constraint violation.
    ///
    /// ## When This Occurs
    /// - Menu item created with an unknown category
    /// - Deleting a menu item that still appears on orders
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Failed to open the database.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Embedded migrations could not be applied.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query rejected by SQLite for a reason other than a known constraint.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// No connection became available before the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything else reported by sqlx.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // SQLite messages:
                //   "UNIQUE constraint failed: <table>.<column>"
                //   "FOREIGN KEY constraint failed"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Convenience type alias for Results with DbError.
pub type DbResult<T> = Result<T, DbError>;
