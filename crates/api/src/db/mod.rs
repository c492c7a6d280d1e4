//! Storage for Tranquil records.
//!
//! Every handler talks to a [`Storage`] trait object, so the same routes run
//! against either backend:
//!
//! - [`MemoryStorage`] keeps everything in process memory and is the default.
//!   Data is lost on restart.
//! - [`PostgresStorage`] persists to `PostgreSQL`.
//!
//! # Tables
//!
//! - `users` - accounts (password hashes only, never plaintext)
//! - `products` - shop catalog
//! - `cart_items` - cart rows, one per add (rows are never merged)
//! - `bookings` - wellness session bookings
//! - `sound_tracks` - sound library
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p tranquil-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;
pub mod seed;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use tranquil_core::{
    Booking, BookingId, BookingStatus, CartItem, CartItemId, CreateUser, NewBooking, NewCartItem,
    NewProduct, NewSoundTrack, Product, ProductId, SoundTrack, SoundTrackId, User, UserId,
};

use crate::config::StorageBackend;

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use seed::{SeedReport, seed_if_empty};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// No identifiers left for a table.
    #[error("identifier space exhausted for {0}")]
    IdsExhausted(&'static str),
}

/// Uniform data access for users, products, cart, bookings and sound tracks.
///
/// Lookups return `Ok(None)` when nothing matches; only backend failures are
/// errors. List operations return records in ascending id order.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short backend name for logs (`"memory"` or `"postgres"`).
    fn backend(&self) -> &'static str;

    /// Check that the backend can serve requests.
    async fn health_check(&self) -> Result<(), RepositoryError>;

    // Users

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Insert a user.
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    async fn create_user(&self, user: CreateUser) -> Result<User, RepositoryError>;

    // Products

    async fn get_all_products(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
    async fn get_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError>;
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    // Cart

    async fn get_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError>;

    /// Append a cart row. Existing rows for the same product are left alone.
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RepositoryError>;

    /// Delete a cart row. Deleting a missing row is not an error.
    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RepositoryError>;

    async fn clear_cart(&self, user_id: UserId) -> Result<(), RepositoryError>;

    // Bookings

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError>;
    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;
    async fn get_bookings_by_user(&self, user_id: UserId) -> Result<Vec<Booking>, RepositoryError>;
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RepositoryError>;

    /// Set a booking's status, returning the updated booking if it exists.
    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepositoryError>;

    // Sound tracks

    async fn get_all_sound_tracks(&self) -> Result<Vec<SoundTrack>, RepositoryError>;
    async fn get_sound_track(&self, id: SoundTrackId)
    -> Result<Option<SoundTrack>, RepositoryError>;
    async fn get_sound_tracks_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SoundTrack>, RepositoryError>;
    async fn create_sound_track(
        &self,
        track: NewSoundTrack,
    ) -> Result<SoundTrack, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Open the configured storage backend.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the `PostgreSQL` pool can't connect.
pub async fn open(backend: &StorageBackend) -> Result<Arc<dyn Storage>, RepositoryError> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PostgresStorage::new(pool)))
        }
    }
}
