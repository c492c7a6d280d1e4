//! User account handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tranquil_core::{Booking, NewUser, User, UserId};

use super::parse_id;
use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::services::accounts::AccountService;
use crate::state::AppState;

/// `POST /api/users`: register an account.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AccountService::new(state.storage()).register(new).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/users/{id}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    let Some(id) = parse_id::<UserId>(&id) else {
        return Err(AppError::not_found("User"));
    };
    state
        .storage()
        .get_user(id)
        .await
        .context("Failed to fetch user")?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User"))
}

/// `GET /api/users/{id}/bookings`
///
/// Bookings hold soft user references, so an unknown user simply has none.
#[instrument(skip(state))]
pub async fn bookings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Booking>>> {
    let Some(id) = parse_id::<UserId>(&id) else {
        return Ok(Json(Vec::new()));
    };
    let bookings = state
        .storage()
        .get_bookings_by_user(id)
        .await
        .context("Failed to fetch bookings")?;
    Ok(Json(bookings))
}
