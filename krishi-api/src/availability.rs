use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use krishi_rental::AvailabilityDay;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, ROLE_PROVIDER};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub product_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub availability: Vec<AvailabilityDay>,
}

#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    pub product_id: Uuid,
    pub date: NaiveDate,
    pub is_available: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/rentals/availability",
        get(get_availability).post(set_availability),
    )
}

/// GET /v1/rentals/availability — recorded (date, is_available) pairs for
/// a product, oldest first. Dates with no record are available.
async fn get_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let availability = state
        .rentals
        .availability(params.product_id, params.start_date, params.end_date)
        .await?;

    Ok(Json(AvailabilityResponse { availability }))
}

/// POST /v1/rentals/availability — provider-initiated upsert of one day's
/// flag, e.g. blocking out a maintenance day. Only the owning provider
/// may change a product's calendar.
async fn set_availability(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<SetAvailabilityRequest>,
) -> Result<Json<AvailabilityDay>, ApiError> {
    let claims = auth::authenticate(&bearer, &state.auth.secret)?;
    claims.require_role(ROLE_PROVIDER)?;
    let provider_id = claims.subject_id()?;

    let product = state
        .products
        .get_product(req.product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    if product.provider_id != provider_id {
        return Err(ApiError::Authorization(
            "Product belongs to another provider".to_string(),
        ));
    }

    let day = state
        .rentals
        .set_availability(req.product_id, req.date, req.is_available)
        .await?;

    Ok(Json(day))
}
