//! Starter catalog loaded into empty storage.

use tranquil_core::{NewProduct, NewSoundTrack, Price};

use super::{RepositoryError, Storage};

/// How many records a seeding pass inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub sound_tracks: usize,
}

impl SeedReport {
    /// Whether anything was inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products == 0 && self.sound_tracks == 0
    }
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w=400&h=300")
}

fn product(
    name: &str,
    description: &str,
    cents: i32,
    category: &str,
    photo: &str,
) -> Result<NewProduct, RepositoryError> {
    let price = Price::from_cents(cents)
        .map_err(|e| RepositoryError::DataCorruption(format!("seed product {name}: {e}")))?;
    Ok(NewProduct {
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        category: category.to_owned(),
        image_url: Some(unsplash(photo)),
        in_stock: Some(true),
    })
}

fn sound_track(
    title: &str,
    description: &str,
    duration: i32,
    category: &str,
    slug: &str,
) -> NewSoundTrack {
    NewSoundTrack {
        title: title.to_owned(),
        description: Some(description.to_owned()),
        duration: Some(duration),
        category: category.to_owned(),
        audio_url: Some(format!("/audio/{slug}.mp3")),
    }
}

/// The starter shop catalog.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a seed price is invalid.
pub fn products() -> Result<Vec<NewProduct>, RepositoryError> {
    Ok(vec![
        product(
            "Sleep Blend Tea",
            "Organic chamomile, lavender & passionflower",
            2400,
            "herbal-tea",
            "1544787219-7f47ccb76574",
        )?,
        product(
            "White Noise Machine",
            "Premium sound therapy device with 20 soothing sounds",
            8900,
            "sound-machine",
            "1518717758536-85ae29035b6d",
        )?,
        product(
            "Relaxation Oil Set",
            "Lavender, eucalyptus & bergamot essential oils",
            4500,
            "essential-oils",
            "1608571423902-eed4a5ad8108",
        )?,
        product(
            "Meditation Cushion",
            "Organic cotton, ergonomic design with buckwheat hull filling",
            6500,
            "meditation",
            "1544367567-0f2fcb009e0b",
        )?,
    ])
}

/// The starter sound library.
#[must_use]
pub fn sound_tracks() -> Vec<NewSoundTrack> {
    vec![
        sound_track(
            "Rain Sounds",
            "Gentle rainfall sounds to calm your mind and prepare for sleep",
            180,
            "rain",
            "rain-sounds",
        ),
        sound_track(
            "Ocean Waves",
            "Rhythmic ocean waves for deep relaxation and meditation",
            330,
            "ocean",
            "ocean-waves",
        ),
        sound_track(
            "Forest Sounds",
            "Birds chirping and leaves rustling in a peaceful forest setting",
            255,
            "forest",
            "forest-sounds",
        ),
        sound_track(
            "Morning Meditation",
            "10-minute guided meditation to start your day",
            600,
            "meditation",
            "morning-meditation",
        ),
        sound_track(
            "Sleep Stories",
            "Calming bedtime stories to help you drift off peacefully",
            900,
            "sleep",
            "sleep-stories",
        ),
    ]
}

/// Insert the starter catalog into tables that are still empty.
///
/// Products and sound tracks are checked separately, so a table that already
/// has rows is left untouched. Running this repeatedly never duplicates data.
///
/// # Errors
///
/// Returns the first storage error encountered.
pub async fn seed_if_empty(storage: &dyn Storage) -> Result<SeedReport, RepositoryError> {
    let mut report = SeedReport::default();

    if storage.get_all_products().await?.is_empty() {
        for new in products()? {
            storage.create_product(new).await?;
            report.products += 1;
        }
    }

    if storage.get_all_sound_tracks().await?.is_empty() {
        for new in sound_tracks() {
            storage.create_sound_track(new).await?;
            report.sound_tracks += 1;
        }
    }

    if report.is_empty() {
        tracing::debug!(backend = storage.backend(), "Catalog already present, skipping seed");
    } else {
        tracing::info!(
            backend = storage.backend(),
            products = report.products,
            sound_tracks = report.sound_tracks,
            "Seeded starter catalog"
        );
    }
    Ok(report)
}
