use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use krishi_catalog::Product;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/products/{id}", get(get_product))
}

/// GET /v1/products/{id} — product detail, served cache-aside.
/// Products are effectively immutable once bookings reference them, so a
/// short TTL is safe.
async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    if let Some(product) = state.product_cache.get(&product_id) {
        return Ok(Json(product));
    }

    let product = state
        .products
        .get_product(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    state.product_cache.insert(product_id, product.clone());

    Ok(Json(product))
}
