//! Seed the starter catalog into `PostgreSQL`.
//!
//! The API server seeds on startup too; this command lets a fresh database be
//! prepared ahead of the first deploy. Tables that already have rows are
//! skipped, so running it twice is harmless.

use tracing::info;

use tranquil_api::db::{self, PostgresStorage};

use super::{CommandError, database_url};

/// Insert the starter products and sound tracks into empty tables.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let storage = PostgresStorage::new(pool);
    let report = db::seed_if_empty(&storage).await?;

    if report.is_empty() {
        info!("Catalog already present, nothing to seed");
    } else {
        info!(
            products = report.products,
            sound_tracks = report.sound_tracks,
            "Seeding complete"
        );
    }
    Ok(())
}
