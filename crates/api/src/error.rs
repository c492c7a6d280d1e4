//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error response is a JSON object with a `message`. Validation
//! failures add an `errors` array of itemized [`Issue`]s.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use tranquil_core::Issue;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed. `context` is the client-facing message.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Request body failed schema validation.
    #[error("Invalid {schema} data")]
    Validation {
        schema: &'static str,
        issues: Vec<Issue>,
    },

    /// Resource not found. Holds the client-facing message.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// `404` with a `"<what> not found"` message.
    #[must_use]
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Storage {
                source: RepositoryError::Conflict(_),
                ..
            }
            | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [Issue]>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage {
                source: RepositoryError::Conflict(detail),
                ..
            } => detail.clone(),
            Self::Storage { context, .. } => (*context).to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            _ => self.to_string(),
        };
        let errors = match &self {
            Self::Validation { issues, .. } => Some(issues.as_slice()),
            _ => None,
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach a client-facing message to storage failures.
pub trait StorageContext<T> {
    /// Convert a `RepositoryError` into `AppError::Storage` with `context`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if `self` is an error.
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, RepositoryError> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Storage { context, source })
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tranquil_core::IssueCode;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn body_json(err: AppError) -> serde_json::Value {
        let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::not_found("Product");
        assert_eq!(err.to_string(), "Product not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::not_found("Booking")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation {
                schema: "product",
                issues: vec![]
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("taken".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Storage {
                context: "Failed to fetch products",
                source: RepositoryError::DataCorruption("bad row".to_string()),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Storage {
                context: "Failed to create user",
                source: RepositoryError::Conflict("email already exists".to_string()),
            }),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let body = body_json(AppError::Storage {
            context: "Failed to fetch products",
            source: RepositoryError::DataCorruption("secret detail".to_string()),
        })
        .await;
        assert_eq!(body, serde_json::json!({ "message": "Failed to fetch products" }));
    }

    #[tokio::test]
    async fn test_validation_body_lists_issues() {
        let body = body_json(AppError::Validation {
            schema: "cart item",
            issues: vec![Issue::required("productId")],
        })
        .await;
        assert_eq!(body["message"], "Invalid cart item data");
        assert_eq!(body["errors"][0]["path"][0], "productId");
        assert_eq!(
            body["errors"][0]["code"],
            serde_json::to_value(IssueCode::InvalidType).unwrap()
        );
    }

    #[test]
    fn test_storage_context() {
        let result: std::result::Result<(), RepositoryError> =
            Err(RepositoryError::IdsExhausted("products"));
        let err = result.context("Failed to create product").unwrap_err();
        assert!(matches!(
            err,
            AppError::Storage {
                context: "Failed to create product",
                ..
            }
        ));
    }
}
