use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// How a marketplace item is sold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Buyable,
    Rentable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Buyable => "buyable",
            ProductType::Rentable => "rentable",
        }
    }
}

impl FromStr for ProductType {
    type Err = ProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyable" => Ok(ProductType::Buyable),
            "rentable" => Ok(ProductType::Rentable),
            other => Err(ProductTypeError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductTypeError {
    #[error("Unknown product type: {0}")]
    Unknown(String),
}

/// Marketplace product, owned by a provider.
///
/// Amounts are whole rupees. Rental fields only carry meaning when
/// `product_type` is `Rentable`; they stay `None` for buyable items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub rental_price_per_day: Option<i64>,
    pub rental_price_per_week: Option<i64>,
    pub rental_price_per_month: Option<i64>,
    pub min_rental_days: Option<i32>,
    pub max_rental_days: Option<i32>,
    pub requires_deposit: bool,
    pub deposit_amount: Option<i64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Product {
    /// Rental pricing configuration as the pricing resolver consumes it
    pub fn rental_terms(&self) -> RentalTerms {
        RentalTerms {
            price_per_day: self.rental_price_per_day,
            price_per_week: self.rental_price_per_week,
            price_per_month: self.rental_price_per_month,
            min_rental_days: self.min_rental_days,
            max_rental_days: self.max_rental_days,
            requires_deposit: self.requires_deposit,
            deposit_amount: self.deposit_amount,
        }
    }
}

/// Snapshot of a product's rate configuration at quoting time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalTerms {
    pub price_per_day: Option<i64>,
    pub price_per_week: Option<i64>,
    pub price_per_month: Option<i64>,
    pub min_rental_days: Option<i32>,
    pub max_rental_days: Option<i32>,
    pub requires_deposit: bool,
    pub deposit_amount: Option<i64>,
}
