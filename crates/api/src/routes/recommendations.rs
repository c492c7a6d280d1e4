//! Wellness suggestion handler.

use axum::Json;
use tracing::instrument;

use crate::extract::JsonOrDefault;

use crate::services::recommendations::{RecommendationRequest, Suggestion, recommend};

/// `POST /api/recommendations`: an empty body counts as `{}`.
#[instrument]
pub async fn create(
    JsonOrDefault(request): JsonOrDefault<RecommendationRequest>,
) -> Json<Vec<Suggestion>> {
    let suggestions = recommend(&request);
    tracing::debug!(count = suggestions.len(), "Recommendations generated");
    Json(suggestions)
}
