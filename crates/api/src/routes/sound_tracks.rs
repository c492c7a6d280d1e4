//! Sound library handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tranquil_core::{NewSoundTrack, SoundTrack, SoundTrackId};

use super::parse_id;
use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<SoundTrack>>> {
    let tracks = state
        .storage()
        .get_all_sound_tracks()
        .await
        .context("Failed to fetch sound tracks")?;
    Ok(Json(tracks))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SoundTrack>> {
    let Some(id) = parse_id::<SoundTrackId>(&id) else {
        return Err(AppError::not_found("Sound track"));
    };
    state
        .storage()
        .get_sound_track(id)
        .await
        .context("Failed to fetch sound track")?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Sound track"))
}

#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<SoundTrack>>> {
    let tracks = state
        .storage()
        .get_sound_tracks_by_category(&category)
        .await
        .context("Failed to fetch sound tracks")?;
    Ok(Json(tracks))
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewSoundTrack>,
) -> Result<(StatusCode, Json<SoundTrack>)> {
    let track = state
        .storage()
        .create_sound_track(new)
        .await
        .context("Failed to create sound track")?;
    Ok((StatusCode::CREATED, Json(track)))
}
