//! Tranquil API library.
//!
//! This crate provides the REST backend as a library, allowing it to be
//! tested and reused. The `tranquil-api` binary wires it to configuration,
//! logging and error tracking.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router.
///
/// With `static_dir`, paths no route claims are served from that directory,
/// falling back to its `index.html` so client-side routing works. Without it,
/// they get a JSON `404`.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = routes::routes().with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router.fallback(not_found),
    };

    router.layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::not_found("Resource")
}
