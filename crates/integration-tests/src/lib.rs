//! Integration tests for Tranquil.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory API tests
//! cargo test -p tranquil-integration-tests
//!
//! # PostgreSQL storage tests (needs a migrated database)
//! TRANQUIL_TEST_DATABASE_URL=postgres://localhost/tranquil_test \
//!     cargo test -p tranquil-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - products, sound tracks and session types
//! - `cart` - cart rows and the priced summary
//! - `bookings` - booking creation and status changes
//! - `accounts` - registration and user lookups
//! - `recommendations` - suggestion rules over HTTP
//! - `postgres_storage` - the `PostgreSQL` backend (ignored by default)
//!
//! Requests are driven through the router in-process with
//! `tower::ServiceExt::oneshot`; no socket is opened.

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use tranquil_api::db::{MemoryStorage, Storage, seed_if_empty};
use tranquil_api::state::AppState;

/// The API wired to a fresh in-memory store.
pub struct TestApp {
    router: Router,
    storage: Arc<MemoryStorage>,
}

/// Status and decoded JSON body of a response (`Null` when empty).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// An app with no records.
    #[must_use]
    pub fn empty() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let shared: Arc<dyn Storage> = storage.clone();
        Self {
            router: tranquil_api::app(AppState::new(shared), None),
            storage,
        }
    }

    /// An app loaded with the starter catalog.
    pub async fn seeded() -> Self {
        let app = Self::empty();
        seed_if_empty(app.storage.as_ref())
            .await
            .expect("seeding memory storage");
        app
    }

    /// Direct access to the backing store.
    #[must_use]
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// POST with no body and no content type.
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a raw request body with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: &'static str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("building request");
        self.call(request).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("building request");
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> TestResponse {
        let Ok(response) = self.router.clone().oneshot(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("reading response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse { status, body }
    }
}

impl TestResponse {
    /// Wire paths of the itemized validation errors, e.g. `["productId"]`.
    #[must_use]
    pub fn error_paths(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["path"].as_array())
                    .map(|path| {
                        path.iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(".")
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
