//! `PostgreSQL` storage backend.
//!
//! Queries are checked at runtime (`query_as` with `FromRow` rows) and each
//! row is converted into its core record, so values that no longer satisfy
//! the record's invariants surface as `RepositoryError::DataCorruption`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use tranquil_core::{
    Booking, BookingId, BookingStatus, CartItem, CartItemId, CreateUser, Email, NewBooking,
    NewCartItem, NewProduct, NewSoundTrack, Price, Product, ProductId, SessionType, SoundTrack,
    SoundTrackId, User, UserId, Username,
};

use super::{RepositoryError, Storage};

/// Storage backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique-constraint violations to `Conflict`.
fn conflict_on_unique(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let what = match db_err.constraint() {
            Some("users_email_key") => "email already exists",
            _ => "username already exists",
        };
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Rows
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        Ok(Self {
            id: row.id,
            username,
            email,
            password_hash: row.password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: i32,
    category: String,
    image_url: Option<String>,
    in_stock: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::from_cents(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            category: row.category,
            image_url: row.image_url,
            in_stock: row.in_stock,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    user_id: Option<UserId>,
    product_id: Option<ProductId>,
    quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: BookingId,
    user_id: Option<UserId>,
    session_type: String,
    therapist_name: Option<String>,
    date: NaiveDate,
    time: String,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let session_type = row
            .session_type
            .parse::<SessionType>()
            .map_err(RepositoryError::DataCorruption)?;
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(RepositoryError::DataCorruption)?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            session_type,
            therapist_name: row.therapist_name,
            date: row.date,
            time: row.time,
            notes: row.notes,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SoundTrackRow {
    id: SoundTrackId,
    title: String,
    description: Option<String>,
    duration: Option<i32>,
    category: String,
    audio_url: Option<String>,
}

impl From<SoundTrackRow> for SoundTrack {
    fn from(row: SoundTrackRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            duration: row.duration,
            category: row.category,
            audio_url: row.audio_url,
        }
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// =============================================================================
// Storage
// =============================================================================

#[async_trait]
impl Storage for PostgresStorage {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn create_user(&self, user: CreateUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            ",
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique)?;

        tracing::debug!(user_id = %row.id, "User created");
        User::try_from(row)
    }

    async fn get_all_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, image_url, in_stock
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, image_url, in_stock
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn get_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, image_url, in_stock
            FROM products
            WHERE category = $1
            ORDER BY id
            ",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, price, category, image_url, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, category, image_url, in_stock
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(product.in_stock.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Product::try_from(row)
    }

    async fn get_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT id, user_id, product_id, quantity
            FROM cart_items
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id, quantity
            ",
        )
        .bind(item.user_id)
        .bind(item.product_id)
        .bind(item.quantity.unwrap_or(1))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(cart_item_id = %row.id, "Cart item added");
        Ok(row.into())
    }

    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(user_id = %user_id, removed = result.rows_affected(), "Cart cleared");
        Ok(())
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r"
            SELECT id, user_id, session_type, therapist_name, date, time, notes, status, created_at
            FROM bookings
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        sqlx::query_as::<_, BookingRow>(
            r"
            SELECT id, user_id, session_type, therapist_name, date, time, notes, status, created_at
            FROM bookings
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Booking::try_from)
        .transpose()
    }

    async fn get_bookings_by_user(&self, user_id: UserId) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r"
            SELECT id, user_id, session_type, therapist_name, date, time, notes, status, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r"
            INSERT INTO bookings (user_id, session_type, therapist_name, date, time, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, session_type, therapist_name, date, time, notes, status, created_at
            ",
        )
        .bind(booking.user_id)
        .bind(booking.session_type.as_str())
        .bind(&booking.therapist_name)
        .bind(booking.date)
        .bind(&booking.time)
        .bind(&booking.notes)
        .bind(booking.status.unwrap_or_default().as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(booking_id = %row.id, "Booking created");
        Booking::try_from(row)
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepositoryError> {
        sqlx::query_as::<_, BookingRow>(
            r"
            UPDATE bookings
            SET status = $1
            WHERE id = $2
            RETURNING id, user_id, session_type, therapist_name, date, time, notes, status, created_at
            ",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Booking::try_from)
        .transpose()
    }

    async fn get_all_sound_tracks(&self) -> Result<Vec<SoundTrack>, RepositoryError> {
        let rows = sqlx::query_as::<_, SoundTrackRow>(
            r"
            SELECT id, title, description, duration, category, audio_url
            FROM sound_tracks
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SoundTrack::from).collect())
    }

    async fn get_sound_track(
        &self,
        id: SoundTrackId,
    ) -> Result<Option<SoundTrack>, RepositoryError> {
        let row = sqlx::query_as::<_, SoundTrackRow>(
            r"
            SELECT id, title, description, duration, category, audio_url
            FROM sound_tracks
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SoundTrack::from))
    }

    async fn get_sound_tracks_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SoundTrack>, RepositoryError> {
        let rows = sqlx::query_as::<_, SoundTrackRow>(
            r"
            SELECT id, title, description, duration, category, audio_url
            FROM sound_tracks
            WHERE category = $1
            ORDER BY id
            ",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SoundTrack::from).collect())
    }

    async fn create_sound_track(
        &self,
        track: NewSoundTrack,
    ) -> Result<SoundTrack, RepositoryError> {
        let row = sqlx::query_as::<_, SoundTrackRow>(
            r"
            INSERT INTO sound_tracks (title, description, duration, category, audio_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, duration, category, audio_url
            ",
        )
        .bind(&track.title)
        .bind(&track.description)
        .bind(track.duration)
        .bind(&track.category)
        .bind(&track.audio_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
