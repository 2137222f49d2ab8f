//! # Validation Module
//!
//! Field validators and the [`Validate`] trait implemented by every request
//! payload in [`crate::input`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON deserialization (serde)                                 │
//! │  ├── Shape and types, enum names                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Lengths, UUID formats, positive quantities, non-empty lists       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE, CHECK and foreign key constraints                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are reported as the client wrote them, including list
//! positions (`orderItems.1.quantity`).

use uuid::Uuid;

use crate::error::ValidationError;
use crate::menu::LineRequest;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A request payload that can check itself before any business logic runs.
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a string's length in characters after trimming.
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_length;
///
/// assert!(validate_length("name", "Tiramisu", 2, 100).is_ok());
/// assert!(validate_length("name", "T", 2, 100).is_err());
/// assert!(validate_length("name", "  ", 2, 100).is_err());
/// ```
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates an optional free-text field against a maximum length.
pub fn validate_optional_max(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(text) if text.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates that an id is a UUID.
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<()> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a UUID".to_string(),
        })
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain contains a dot that is neither first nor last
pub fn validate_email(field: &str, email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid email address".to_string(),
    };

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a password. Minimum 6 characters.
pub fn validate_password(field: &str, password: &str) -> ValidationResult<()> {
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: 6,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an ordered quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a strictly positive number (base price, capacity).
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a number that may be zero but not negative (surcharge, stock).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - At least `min` (1 for base prices, 0 for surcharges)
/// - Must not exceed MAX_PRICE_CENTS
pub fn validate_price(field: &str, cents: i64, min: i64) -> ValidationResult<()> {
    if cents < min || cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Order Lines
// =============================================================================

/// Validates a list of submitted order lines.
///
/// ## Rules
/// - At least one line
/// - `menuItemId` and `variantId` (when present) are UUIDs
/// - Quantity passes [`validate_quantity`]
///
/// ## Example
/// ```rust
/// use bistro_core::menu::LineRequest;
/// use bistro_core::validation::validate_lines;
///
/// let err = validate_lines("orderItems", &[]).unwrap_err();
/// assert_eq!(err.field(), "orderItems");
///
/// let line = LineRequest {
///     menu_item_id: "b2c6b3de-8d4b-4a0e-9a43-2d0f1c1f0a11".to_string(),
///     variant_id: None,
///     quantity: 0,
///     notes: None,
/// };
/// let err = validate_lines("orderItems", &[line]).unwrap_err();
/// assert_eq!(err.field(), "orderItems.0.quantity");
/// ```
pub fn validate_lines(field: &str, lines: &[LineRequest]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::TooFew {
            field: field.to_string(),
            min: 1,
        });
    }

    for (index, line) in lines.iter().enumerate() {
        validate_uuid(&format!("{field}.{index}.menuItemId"), &line.menu_item_id)?;
        if let Some(variant_id) = &line.variant_id {
            validate_uuid(&format!("{field}.{index}.variantId"), variant_id)?;
        }
        validate_quantity(&format!("{field}.{index}.quantity"), line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
