//! Request extractors.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use tranquil_core::validation::{self, Schema};
use tranquil_core::{Issue, IssueCode};

use crate::error::AppError;

/// JSON body parsed and validated against schema `T`.
///
/// Rejects with `400` and itemized issues when the body isn't JSON or fails
/// validation. Handlers never see an invalid value.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation {
                schema: T::NAME,
                issues: vec![Issue::new(
                    IssueCode::InvalidType,
                    None,
                    rejection.body_text(),
                )],
            })?;

        validation::parse::<T>(value)
            .map(Self)
            .map_err(|issues| AppError::Validation {
                schema: T::NAME,
                issues,
            })
    }
}

/// Optional JSON body: a missing or blank body yields `T::default()`.
///
/// The content type isn't checked. A body that is present but isn't valid
/// JSON for `T` rejects with `400` and a single issue.
#[derive(Debug, Clone)]
pub struct JsonOrDefault<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrDefault<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if bytes.trim_ascii().is_empty() {
            return Ok(Self(T::default()));
        }
        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::Validation {
                schema: "request",
                issues: vec![Issue::new(IssueCode::InvalidType, None, e.to_string())],
            })
    }
}
