//! In-process storage backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tranquil_core::{
    Booking, BookingId, BookingStatus, CartItem, CartItemId, CreateUser, NewBooking, NewCartItem,
    NewProduct, NewSoundTrack, Product, ProductId, SoundTrack, SoundTrackId, User, UserId,
};

use super::{RepositoryError, Storage};

/// Storage held entirely in memory.
///
/// Each table is an ordered map keyed by id, so lists come back in insertion
/// order. Ids start at 1 per table and are never reused, even after deletes.
/// One lock guards all tables, making each operation atomic.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    products: BTreeMap<ProductId, Product>,
    cart_items: BTreeMap<CartItemId, CartItem>,
    bookings: BTreeMap<BookingId, Booking>,
    sound_tracks: BTreeMap<SoundTrackId, SoundTrack>,
    ids: IdCounters,
}

/// Last id handed out per table (0 = none yet).
#[derive(Debug, Default)]
struct IdCounters {
    user: i32,
    product: i32,
    cart_item: i32,
    booking: i32,
    sound_track: i32,
}

fn next_id(counter: &mut i32, table: &'static str) -> Result<i32, RepositoryError> {
    let id = counter
        .checked_add(1)
        .ok_or(RepositoryError::IdsExhausted(table))?;
    *counter = id;
    Ok(id)
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn create_user(&self, user: CreateUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = UserId::new(next_id(&mut tables.ids.user, "users")?);
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        tracing::debug!(user_id = %id, "User created");
        Ok(user)
    }

    async fn get_all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables.read().await.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn get_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = ProductId::new(next_id(&mut tables.ids.product, "products")?);
        let product = product.into_product(id);
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart_items
            .values()
            .filter(|item| item.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = CartItemId::new(next_id(&mut tables.ids.cart_item, "cart_items")?);
        let item = item.into_cart_item(id);
        tables.cart_items.insert(id, item.clone());
        tracing::debug!(cart_item_id = %id, "Cart item added");
        Ok(item)
    }

    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RepositoryError> {
        self.tables.write().await.cart_items.remove(&id);
        Ok(())
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .cart_items
            .retain(|_, item| item.user_id != Some(user_id));
        Ok(())
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.tables.read().await.bookings.values().cloned().collect())
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn get_bookings_by_user(&self, user_id: UserId) -> Result<Vec<Booking>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .values()
            .filter(|b| b.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = BookingId::new(next_id(&mut tables.ids.booking, "bookings")?);
        let booking = booking.into_booking(id, Utc::now());
        tables.bookings.insert(id, booking.clone());
        tracing::debug!(booking_id = %id, "Booking created");
        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.bookings.get_mut(&id).map(|booking| {
            booking.status = status;
            booking.clone()
        }))
    }

    async fn get_all_sound_tracks(&self) -> Result<Vec<SoundTrack>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .sound_tracks
            .values()
            .cloned()
            .collect())
    }

    async fn get_sound_track(
        &self,
        id: SoundTrackId,
    ) -> Result<Option<SoundTrack>, RepositoryError> {
        Ok(self.tables.read().await.sound_tracks.get(&id).cloned())
    }

    async fn get_sound_tracks_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SoundTrack>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sound_tracks
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect())
    }

    async fn create_sound_track(
        &self,
        track: NewSoundTrack,
    ) -> Result<SoundTrack, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = SoundTrackId::new(next_id(&mut tables.ids.sound_track, "sound_tracks")?);
        let track = track.into_sound_track(id);
        tables.sound_tracks.insert(id, track.clone());
        Ok(track)
    }
}
