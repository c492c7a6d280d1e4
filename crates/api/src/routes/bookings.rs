//! Session booking handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tranquil_core::{Booking, BookingId, BookingStatusUpdate, NewBooking};

use super::parse_id;
use crate::error::{AppError, Result, StorageContext, add_breadcrumb};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// `GET /api/bookings`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Booking>>> {
    let bookings = state
        .storage()
        .get_all_bookings()
        .await
        .context("Failed to fetch bookings")?;
    Ok(Json(bookings))
}

/// `GET /api/bookings/{id}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Booking>> {
    let Some(id) = parse_id::<BookingId>(&id) else {
        return Err(AppError::not_found("Booking"));
    };
    state
        .storage()
        .get_booking(id)
        .await
        .context("Failed to fetch booking")?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Booking"))
}

/// `POST /api/bookings`
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewBooking>,
) -> Result<(StatusCode, Json<Booking>)> {
    let booking = state
        .storage()
        .create_booking(new)
        .await
        .context("Failed to create booking")?;

    add_breadcrumb(
        "booking",
        "Booked session",
        Some(&[("session_type", booking.session_type.as_str())]),
    );
    tracing::info!(booking_id = %booking.id, session_type = %booking.session_type, "Booking created");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `PATCH /api/bookings/{id}/status`
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<BookingStatusUpdate>,
) -> Result<Json<Booking>> {
    let Some(id) = parse_id::<BookingId>(&id) else {
        return Err(AppError::not_found("Booking"));
    };
    let booking = state
        .storage()
        .update_booking_status(id, update.status)
        .await
        .context("Failed to update booking status")?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    tracing::info!(booking_id = %booking.id, status = %booking.status, "Booking status updated");
    Ok(Json(booking))
}
