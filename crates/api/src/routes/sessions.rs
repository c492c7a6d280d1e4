//! Bookable session offerings.

use axum::Json;
use serde::Serialize;

use tranquil_core::{Price, SessionType};

/// One bookable kind of session, as shown on the booking page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOffering {
    pub id: SessionType,
    pub title: &'static str,
    pub description: &'static str,
    pub practitioner: &'static str,
    pub price: Price,
    pub price_display: String,
    pub duration_minutes: u32,
}

impl From<SessionType> for SessionOffering {
    fn from(kind: SessionType) -> Self {
        Self {
            id: kind,
            title: kind.title(),
            description: kind.description(),
            practitioner: kind.default_practitioner(),
            price: kind.price(),
            price_display: kind.price().display(),
            duration_minutes: kind.duration_minutes(),
        }
    }
}

/// `GET /api/session-types`
pub async fn index() -> Json<Vec<SessionOffering>> {
    Json(SessionType::ALL.into_iter().map(SessionOffering::from).collect())
}
