//! Request body extraction with validation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::Json;
use bistro_core::validation::Validate;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body that has passed its [`Validate`] rules.
///
/// Malformed JSON and rule violations both become 400 responses in the
/// standard error envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::bad_request(rejection.body_text()))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// An optional body: a request without a `Content-Type` yields `None`, so
/// payloads whose fields all have defaults may be left out entirely.
impl<S, T> OptionalFromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::bad_request(rejection.body_text()))?;

        match body {
            Some(Json(value)) => {
                value.validate()?;
                Ok(Some(ValidatedJson(value)))
            }
            None => Ok(None),
        }
    }
}
