//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Order lifecycle rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  bistro-server errors (in app)                                         │
//! │  └── ApiError         - What HTTP clients see (JSON envelope)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! │                          DbError ─────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is terminal for the request that produced it. Nothing in
//! the order path retries; the server rolls the transaction back and maps
//! the variant onto an HTTP status.

use thiserror::Error;

use crate::types::{OrderStatus, TableStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Order lifecycle errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Unknown order, table or menu item id
    /// - A variant id that is not part of the referenced menu item
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Menu item exists but is switched off (unavailable or inactive).
    #[error("Menu item '{name}' is not available")]
    Unavailable { name: String },

    /// The order's current status forbids the operation.
    ///
    /// ## When This Occurs
    /// - Adding items to a CANCELLED order
    #[error("Cannot {action} an order with status {status}")]
    InvalidState { action: String, status: OrderStatus },

    /// The requested status change is not in the transition table.
    ///
    /// ## User Workflow
    /// ```text
    /// Waiter taps "Ready" on a PENDING order
    ///      │
    ///      ▼
    /// PENDING → READY not allowed
    ///      │
    ///      ▼
    /// InvalidTransition { from: PENDING, to: READY }
    /// ```
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Dine-in order against a table that is not AVAILABLE.
    #[error("Table {table_number} is not available (status: {status})")]
    TableUnavailable { table_number: i64, status: TableStatus },

    /// Kitchen ticket requested but nothing is left to send.
    #[error("No items to print")]
    NoItemsToPrint,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the HTTP boundary before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// List has fewer entries than required.
    #[error("{field} must contain at least {min} item(s)")]
    TooFew { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must be at least 0")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field, as it appears in the request body.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::TooFew { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
