use crate::models::{AvailabilityDay, BookingPage, BookingStatus, RentalBooking};
use async_trait::async_trait;
use chrono::NaiveDate;
use krishi_catalog::Product;
use uuid::Uuid;

/// Storage-level failures surfaced by the repositories
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// One or more dates were already blocked when the write tried to
    /// claim them. Carries the offending dates.
    #[error("Dates already blocked for this product")]
    Conflict(Vec<NaiveDate>),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepoError {
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        RepoError::Storage(err.to_string())
    }
}

/// Read access to the product catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError>;
}

/// Rental bookings and the per-date availability table
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Dates within the inclusive range explicitly marked unavailable.
    /// Dates with no record are available.
    async fn unavailable_dates(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>, RepoError>;

    /// Persist a booking and block its full date range in one atomic
    /// operation. Fails with [`RepoError::Conflict`] if any date in the
    /// range is already blocked, leaving nothing persisted.
    async fn create_booking(&self, booking: &RentalBooking) -> Result<(), RepoError>;

    async fn list_bookings(
        &self,
        farmer_id: Uuid,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> Result<BookingPage, RepoError>;

    /// Ordered (date, is_available) records for a product, optionally
    /// bounded on either side
    async fn availability(
        &self,
        product_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AvailabilityDay>, RepoError>;

    /// Provider-initiated upsert of a single day's flag, e.g. blocking
    /// out dates unrelated to bookings
    async fn set_availability(
        &self,
        product_id: Uuid,
        date: NaiveDate,
        is_available: bool,
    ) -> Result<AvailabilityDay, RepoError>;
}
