//! # API Errors
//!
//! Every failure leaves a handler as an [`ApiError`] and reaches the client
//! in one envelope:
//!
//! ```text
//! {
//!   "success": false,
//!   "status":  409,
//!   "message": "Table 4 is not available (status: OCCUPIED)",
//!   "errors":  null | [{ "field": "orderItems.0.quantity", "message": "..." }],
//!   "stack":   "..."            (omitted in production)
//! }
//! ```
//!
//! ## Status Mapping
//! | Source                      | Status |
//! |-----------------------------|--------|
//! | NotFound                    | 404    |
//! | Unavailable                 | 422    |
//! | InvalidState                | 409    |
//! | TableUnavailable            | 409    |
//! | InvalidTransition           | 400    |
//! | NoItemsToPrint              | 400    |
//! | Validation / bad JSON       | 400    |
//! | Unique / foreign key        | 400    |
//! | Unauthenticated             | 401    |
//! | Forbidden                   | 403    |
//! | anything else               | 500    |

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bistro_core::{CoreError, ValidationError};
use bistro_db::DbError;
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Field-level failures collected from a request body.
    #[error("Validation error")]
    Validation(Vec<ValidationError>),

    /// The body was not valid JSON or did not match the payload shape.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for handlers and services.
pub type ApiResult<T> = Result<T, ApiError>;

/// One entry of the `errors` array.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Shorthand for a missing entity.
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        ApiError::Core(CoreError::not_found(entity, id))
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::Unavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::InvalidState { .. } => StatusCode::CONFLICT,
                CoreError::TableUnavailable { .. } => StatusCode::CONFLICT,
                CoreError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
                CoreError::NoItemsToPrint => StatusCode::BAD_REQUEST,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::Db(err) => match err {
                DbError::NotFound { .. } => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message and optional field errors.
    fn message_and_details(&self) -> (String, Option<Vec<FieldError>>) {
        match self {
            ApiError::Validation(errors) => (
                "Validation error".to_string(),
                Some(errors.iter().map(field_error).collect()),
            ),
            ApiError::Core(CoreError::Validation(err)) => {
                ("Validation error".to_string(), Some(vec![field_error(err)]))
            }
            ApiError::Db(DbError::UniqueViolation { field, .. }) => (
                "Unique constraint failed".to_string(),
                Some(vec![FieldError {
                    field: field.clone(),
                    message: "Value already exists".to_string(),
                }]),
            ),
            ApiError::Db(DbError::ForeignKeyViolation { .. }) => {
                ("Referenced record does not exist or is still in use".to_string(), None)
            }
            ApiError::Db(DbError::NotFound { .. }) => (self.to_string(), None),
            ApiError::Db(_) | ApiError::Internal(_) => {
                ("Internal Server Error".to_string(), None)
            }
            _ => (self.to_string(), None),
        }
    }
}

fn field_error(err: &ValidationError) -> FieldError {
    FieldError {
        field: err.field().to_string(),
        message: err.to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(vec![err])
    }
}

/// The rendered envelope plus the error's debug form, carried in the
/// response extensions until [`attach_stack`] decides whether to show it.
#[derive(Debug, Clone)]
struct ErrorReport {
    body: ErrorBody,
    stack: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let (message, errors) = self.message_and_details();
        let body = ErrorBody {
            success: false,
            status: status.as_u16(),
            message,
            errors,
            stack: None,
        };
        let report = ErrorReport {
            body: body.clone(),
            stack: format!("{:?}", self),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Response middleware: re-renders error envelopes with a `stack` field
/// when the server configuration allows it.
pub async fn attach_stack(State(state): State<AppState>, mut response: Response) -> Response {
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };
    if !state.config.expose_error_stack() {
        return response;
    }

    let body = ErrorBody {
        stack: Some(report.stack),
        ..report.body
    };
    (response.status(), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{OrderStatus, TableStatus};

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (CoreError::not_found("Order", "x"), StatusCode::NOT_FOUND),
            (
                CoreError::Unavailable {
                    name: "Soup".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::InvalidState {
                    action: "add items to".to_string(),
                    status: OrderStatus::Cancelled,
                },
                StatusCode::CONFLICT,
            ),
            (
                CoreError::TableUnavailable {
                    table_number: 4,
                    status: TableStatus::Occupied,
                },
                StatusCode::CONFLICT,
            ),
            (
                CoreError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Ready,
                },
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::NoItemsToPrint, StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_storage_failures_hide_detail() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let (message, errors) = err.message_and_details();
        assert_eq!(message, "Internal Server Error");
        assert!(errors.is_none());
    }

    #[test]
    fn test_unique_violation_message() {
        let err = ApiError::from(DbError::UniqueViolation {
            field: "users.email".to_string(),
            value: String::new(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let (message, errors) = err.message_and_details();
        assert_eq!(message, "Unique constraint failed");
        assert_eq!(errors.unwrap()[0].field, "users.email");
    }
}
