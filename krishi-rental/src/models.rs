use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Booking lifecycle. Only `Pending` is ever produced by the orchestrator;
/// the remaining states exist so stored rows and status filters stay
/// expressive for downstream flows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// A confirmed rental reservation. Prices are snapshots taken from the
/// product at booking time, not live references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalBooking {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub provider_id: Uuid,
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub rental_rate_type: crate::pricing::RateType,
    pub rate_per_period: i64,
    pub total_amount: i64,
    pub deposit_amount: i64,
    pub status: BookingStatus,
    pub delivery_address: Option<serde_json::Value>,
    pub pickup_address: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day's booking state for one product. Absence of a record means the
/// date is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub is_available: bool,
}

/// Page of bookings plus the unpaged total, for the list endpoint
#[derive(Debug, Clone)]
pub struct BookingPage {
    pub bookings: Vec<RentalBooking>,
    pub total: i64,
}
