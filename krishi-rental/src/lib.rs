pub mod availability;
pub mod memory;
pub mod models;
pub mod orchestrator;
pub mod pricing;
pub mod repository;
pub mod validator;

pub use models::{AvailabilityDay, BookingPage, BookingStatus, RentalBooking};
pub use orchestrator::{BookingOrchestrator, BookingRequest};
pub use pricing::{BookingQuote, RateType};
pub use repository::{ProductRepository, RentalRepository, RepoError};

/// Failure taxonomy for the booking flow.
///
/// The first six variants are caller-correctable and detected before any
/// write; `DatesUnavailable` is raised both by the pre-check and by the
/// transactional write when a concurrent booking wins a date.
#[derive(Debug, thiserror::Error)]
pub enum RentalError {
    #[error("Product not found")]
    NotFound,

    #[error("Product is not available for rental")]
    ProductNotRentable,

    #[error("{0}")]
    InvalidDateRange(&'static str),

    #[error("Minimum rental period is {0} days")]
    DurationTooShort(i32),

    #[error("Maximum rental period is {0} days")]
    DurationTooLong(i32),

    #[error("Invalid rental rate type: {0}")]
    InvalidRateType(String),

    #[error("Product is not available for the selected dates")]
    DatesUnavailable,

    #[error("Storage failure: {0}")]
    Persistence(String),
}
