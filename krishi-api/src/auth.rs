use crate::error::ApiError;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_FARMER: &str = "farmer";
pub const ROLE_PROVIDER: &str = "provider";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    /// The authenticated subject as an id. For provider-role tokens this
    /// is the provider id; for farmer-role tokens the farmer id.
    pub fn subject_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| ApiError::Authentication("Invalid subject in token".to_string()))
    }

    pub fn require_role(&self, role: &str) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Authorization(format!(
                "Requires the {} role",
                role
            )))
        }
    }
}

/// Decode and verify the bearer token against the configured HMAC secret
pub fn authenticate(bearer: &Bearer, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        bearer.token(),
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::Authentication(e.to_string()))?;

    Ok(token_data.claims)
}
