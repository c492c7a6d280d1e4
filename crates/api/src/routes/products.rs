//! Shop catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tranquil_core::{NewProduct, Product, ProductId};

use super::parse_id;
use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .storage()
        .get_all_products()
        .await
        .context("Failed to fetch products")?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let Some(id) = parse_id::<ProductId>(&id) else {
        return Err(AppError::not_found("Product"));
    };
    state
        .storage()
        .get_product(id)
        .await
        .context("Failed to fetch product")?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product"))
}

/// `GET /api/products/category/{category}`
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .storage()
        .get_products_by_category(&category)
        .await
        .context("Failed to fetch products")?;
    Ok(Json(products))
}

/// `POST /api/products`
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state
        .storage()
        .create_product(new)
        .await
        .context("Failed to create product")?;
    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}
