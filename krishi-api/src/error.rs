use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use krishi_rental::{RentalError, RepoError};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Authentication(String),
    Authorization(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Authorization(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        let msg = err.to_string();
        match err {
            RentalError::NotFound => ApiError::NotFound(msg),
            RentalError::ProductNotRentable
            | RentalError::InvalidDateRange(_)
            | RentalError::DurationTooShort(_)
            | RentalError::DurationTooLong(_)
            | RentalError::InvalidRateType(_) => ApiError::Validation(msg),
            RentalError::DatesUnavailable => ApiError::Conflict(msg),
            RentalError::Persistence(_) => ApiError::Internal(msg),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(_) => {
                ApiError::Conflict("Dates already blocked for this product".to_string())
            }
            RepoError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}
