use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use krishi_rental::{BookingRequest, BookingStatus, RentalBooking};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, ROLE_FARMER};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_rate_type: String,
    pub delivery_address: Option<serde_json::Value>,
    pub pickup_address: Option<serde_json::Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub provider_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub rental_rate_type: String,
    pub rate_per_period: i64,
    pub total_amount: i64,
    pub deposit_amount: i64,
    pub status: String,
    pub delivery_address: Option<serde_json::Value>,
    pub pickup_address: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RentalBooking> for RentalResponse {
    fn from(booking: RentalBooking) -> Self {
        Self {
            id: booking.id,
            product_id: booking.product_id,
            provider_id: booking.provider_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_days: booking.total_days,
            rental_rate_type: booking.rental_rate_type.as_str().to_string(),
            rate_per_period: booking.rate_per_period,
            total_amount: booking.total_amount,
            deposit_amount: booking.deposit_amount,
            status: booking.status.as_str().to_string(),
            delivery_address: booking.delivery_address,
            pickup_address: booking.pickup_address,
            notes: booking.notes,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListRentalsParams {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListRentalsResponse {
    pub rentals: Vec<RentalResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/rentals", post(create_rental).get(list_rentals))
}

/// POST /v1/rentals — create a rental booking for the authenticated farmer
async fn create_rental(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<RentalResponse>), ApiError> {
    let claims = auth::authenticate(&bearer, &state.auth.secret)?;
    claims.require_role(ROLE_FARMER)?;
    let farmer_id = claims.subject_id()?;

    let booking = state
        .bookings
        .create_booking(
            farmer_id,
            BookingRequest {
                product_id: req.product_id,
                start_date: req.start_date,
                end_date: req.end_date,
                rental_rate_type: req.rental_rate_type,
                delivery_address: req.delivery_address,
                pickup_address: req.pickup_address,
                notes: req.notes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /v1/rentals — the authenticated farmer's bookings, newest first
async fn list_rentals(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Query(params): Query<ListRentalsParams>,
) -> Result<Json<ListRentalsResponse>, ApiError> {
    let claims = auth::authenticate(&bearer, &state.auth.secret)?;
    claims.require_role(ROLE_FARMER)?;
    let farmer_id = claims.subject_id()?;

    let status = params
        .status
        .as_deref()
        .map(|s| {
            s.parse::<BookingStatus>()
                .map_err(|_| ApiError::Validation(format!("Unknown booking status: {}", s)))
        })
        .transpose()?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let result = state
        .rentals
        .list_bookings(farmer_id, status, page, limit)
        .await?;

    let total_pages = (result.total + i64::from(limit) - 1) / i64::from(limit);

    Ok(Json(ListRentalsResponse {
        rentals: result.bookings.into_iter().map(Into::into).collect(),
        pagination: Pagination {
            page,
            limit,
            total: result.total,
            total_pages,
        },
    }))
}
