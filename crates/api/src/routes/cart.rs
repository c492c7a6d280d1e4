//! Cart handlers.
//!
//! There is no authentication: every cart request acts for the demo user.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tranquil_core::{CartItem, CartItemId, CartSummary, NewCartItem, UserId};

use super::parse_id;
use crate::error::{AppError, Result, StorageContext, add_breadcrumb};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// The user every cart request acts for.
pub const DEMO_USER_ID: UserId = UserId::new(1);

/// `GET /api/cart`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CartItem>>> {
    let items = state
        .storage()
        .get_cart_items(DEMO_USER_ID)
        .await
        .context("Failed to fetch cart items")?;
    Ok(Json(items))
}

/// `GET /api/cart/summary`: cart rows joined with their products.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<CartSummary>> {
    let items = state
        .storage()
        .get_cart_items(DEMO_USER_ID)
        .await
        .context("Failed to fetch cart items")?;
    if items.is_empty() {
        return Ok(Json(CartSummary::empty()));
    }
    let products = state
        .storage()
        .get_all_products()
        .await
        .context("Failed to fetch cart items")?;
    let summary = CartSummary::build(items, &products)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(summary))
}

/// `POST /api/cart`
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    ValidatedJson(mut new): ValidatedJson<NewCartItem>,
) -> Result<(StatusCode, Json<CartItem>)> {
    new.user_id = new.user_id.or(Some(DEMO_USER_ID));
    let item = state
        .storage()
        .add_to_cart(new)
        .await
        .context("Failed to add item to cart")?;

    if let Some(product_id) = item.product_id {
        let product_id = product_id.to_string();
        add_breadcrumb(
            "cart",
            "Added item to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    }
    Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /api/cart/{id}`: always `204`, even for unknown ids.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if let Some(id) = parse_id::<CartItemId>(&id) {
        state
            .storage()
            .remove_from_cart(id)
            .await
            .context("Failed to remove item from cart")?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/cart`
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state
        .storage()
        .clear_cart(DEMO_USER_ID)
        .await
        .context("Failed to clear cart")?;
    Ok(StatusCode::NO_CONTENT)
}
