//! HTTP route handlers.
//!
//! All endpoints live under `/api` and speak JSON. Ids in paths are decimal
//! integers; an id that doesn't parse is treated like one that doesn't exist.

pub mod bookings;
pub mod cart;
pub mod health;
pub mod products;
pub mod recommendations;
pub mod sessions;
pub mod sound_tracks;
pub mod users;

use std::str::FromStr;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Parse a path id, or `None` if it isn't a valid id.
pub(crate) fn parse_id<I: FromStr>(raw: &str) -> Option<I> {
    raw.parse().ok()
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", get(products::show))
        .route("/category/{category}", get(products::by_category))
}

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::index).post(cart::add).delete(cart::clear))
        .route("/summary", get(cart::summary))
        .route("/{id}", delete(cart::remove))
}

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::index).post(bookings::create))
        .route("/{id}", get(bookings::show))
        .route("/{id}/status", patch(bookings::update_status))
}

pub fn sound_track_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sound_tracks::index).post(sound_tracks::create))
        .route("/{id}", get(sound_tracks::show))
        .route("/category/{category}", get(sound_tracks::by_category))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{id}", get(users::show))
        .route("/{id}/bookings", get(users::bookings))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Shop
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        // Sessions
        .route("/api/session-types", get(sessions::index))
        .nest("/api/bookings", booking_routes())
        // Sound library
        .nest("/api/sound-tracks", sound_track_routes())
        // Accounts
        .nest("/api/users", user_routes())
        // Wellness suggestions
        .route("/api/recommendations", post(recommendations::create))
}

#[cfg(test)]
mod tests {
    use tranquil_core::ProductId;

    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<ProductId>("3"), Some(ProductId::new(3)));
        assert_eq!(parse_id::<ProductId>("abc"), None);
        assert_eq!(parse_id::<ProductId>(""), None);
        assert_eq!(parse_id::<ProductId>("1.5"), None);
    }
}
