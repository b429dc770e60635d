use crate::models::{BookingStatus, RentalBooking};
use crate::pricing::{self, RateType};
use crate::repository::{ProductRepository, RentalRepository, RepoError};
use crate::{validator, RentalError};
use chrono::NaiveDate;
use krishi_catalog::ProductType;
use krishi_shared::Clock;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Incoming booking request, already stripped of transport concerns.
/// The renter identity comes from the caller's auth context.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_rate_type: String,
    pub delivery_address: Option<serde_json::Value>,
    pub pickup_address: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// Composes validation, pricing, availability and persistence into the
/// booking flow. All collaborators are injected; nothing here is global.
pub struct BookingOrchestrator {
    products: Arc<dyn ProductRepository>,
    rentals: Arc<dyn RentalRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingOrchestrator {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        rentals: Arc<dyn RentalRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            rentals,
            clock,
        }
    }

    /// Create a rental booking.
    ///
    /// Rejections happen before any write. The final step persists the
    /// booking and blocks its date range in a single atomic repository
    /// call; a date claimed by a concurrent booking between the pre-check
    /// and the write surfaces as `DatesUnavailable`, with nothing stored.
    pub async fn create_booking(
        &self,
        farmer_id: Uuid,
        req: BookingRequest,
    ) -> Result<RentalBooking, RentalError> {
        // 1. Product must exist, be active and be rentable
        let product = self
            .products
            .get_product(req.product_id)
            .await
            .map_err(map_repo_error)?
            .filter(|p| p.is_active)
            .ok_or(RentalError::NotFound)?;

        if product.product_type != ProductType::Rentable {
            return Err(RentalError::ProductNotRentable);
        }

        // 2. Date range
        let range = validator::validate_range(
            self.clock.today(),
            req.start_date,
            req.end_date,
            product.min_rental_days,
            product.max_rental_days,
        )?;

        // 3. Pricing snapshot
        let rate_type: RateType = req.rental_rate_type.parse()?;
        let quote = pricing::resolve_quote(rate_type, &product.rental_terms(), range.total_days);

        // 4. Advisory availability pre-check; the write re-verifies under lock
        let blocked = self
            .rentals
            .unavailable_dates(product.id, range.start_date, range.end_date)
            .await
            .map_err(map_repo_error)?;

        if !blocked.is_empty() {
            warn!(
                product_id = %product.id,
                blocked = blocked.len(),
                "booking rejected: requested range overlaps blocked dates"
            );
            return Err(RentalError::DatesUnavailable);
        }

        // 5+6. Persist the booking and block its dates atomically
        let now = self.clock.now();
        let booking = RentalBooking {
            id: Uuid::new_v4(),
            farmer_id,
            provider_id: product.provider_id,
            product_id: product.id,
            start_date: range.start_date,
            end_date: range.end_date,
            total_days: range.total_days,
            rental_rate_type: rate_type,
            rate_per_period: quote.rate_per_period,
            total_amount: quote.total_amount,
            deposit_amount: quote.deposit_amount,
            status: BookingStatus::Pending,
            delivery_address: req.delivery_address,
            pickup_address: req.pickup_address,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };

        match self.rentals.create_booking(&booking).await {
            Ok(()) => {
                info!(
                    booking_id = %booking.id,
                    product_id = %booking.product_id,
                    total_days = booking.total_days,
                    total_amount = booking.total_amount,
                    "rental booking created"
                );
                Ok(booking)
            }
            Err(RepoError::Conflict(dates)) => {
                warn!(
                    product_id = %booking.product_id,
                    conflicts = dates.len(),
                    "booking lost the race for its dates"
                );
                Err(RentalError::DatesUnavailable)
            }
            Err(RepoError::Storage(msg)) => Err(RentalError::Persistence(msg)),
        }
    }
}

fn map_repo_error(err: RepoError) -> RentalError {
    match err {
        RepoError::Conflict(_) => RentalError::DatesUnavailable,
        RepoError::Storage(msg) => RentalError::Persistence(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::dates_in_range;
    use crate::memory::{InMemoryCatalog, InMemoryRentalStore};
    use chrono::{Duration, TimeZone, Utc};
    use krishi_catalog::Product;
    use krishi_shared::ManualClock;

    fn fixed_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        ))
    }

    fn tractor(provider_id: Uuid) -> Product {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        Product {
            id: Uuid::new_v4(),
            provider_id,
            name: "Tractor with rotavator".to_string(),
            description: None,
            product_type: ProductType::Rentable,
            rental_price_per_day: Some(500),
            rental_price_per_week: Some(3000),
            rental_price_per_month: Some(10000),
            min_rental_days: None,
            max_rental_days: None,
            requires_deposit: true,
            deposit_amount: Some(2000),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    struct Harness {
        catalog: Arc<InMemoryCatalog>,
        rentals: Arc<InMemoryRentalStore>,
        clock: Arc<ManualClock>,
        orchestrator: BookingOrchestrator,
    }

    fn harness() -> Harness {
        let catalog = Arc::new(InMemoryCatalog::new());
        let rentals = Arc::new(InMemoryRentalStore::new());
        let clock = fixed_clock();
        let orchestrator = BookingOrchestrator::new(
            catalog.clone(),
            rentals.clone(),
            clock.clone(),
        );
        Harness {
            catalog,
            rentals,
            clock,
            orchestrator,
        }
    }

    fn request(product_id: Uuid, start: NaiveDate, end: NaiveDate, rate: &str) -> BookingRequest {
        BookingRequest {
            product_id,
            start_date: start,
            end_date: end,
            rental_rate_type: rate.to_string(),
            delivery_address: None,
            pickup_address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_daily_booking_three_days() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let booking = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(3), "daily"),
            )
            .await
            .unwrap();

        assert_eq!(booking.total_days, 3);
        assert_eq!(booking.rate_per_period, 500);
        assert_eq!(booking.total_amount, 1500);
        assert_eq!(booking.deposit_amount, 2000);
        assert_eq!(booking.status, BookingStatus::Pending);

        // Every day from start to end inclusive is now blocked
        let days = h
            .rentals
            .availability(product_id, None, None)
            .await
            .unwrap();
        let expected = dates_in_range(booking.start_date, booking.end_date);
        assert_eq!(days.len(), expected.len());
        assert!(days.iter().all(|d| !d.is_available));
    }

    #[tokio::test]
    async fn test_weekly_booking_ten_days() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let booking = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(10), "weekly"),
            )
            .await
            .unwrap();

        assert_eq!(booking.total_days, 10);
        assert_eq!(booking.rate_per_period, 3000);
        assert_eq!(booking.total_amount, 6000);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let h = harness();
        let today = h.clock.today();

        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(Uuid::new_v4(), today, today + Duration::days(2), "daily"),
            )
            .await;

        assert!(matches!(result, Err(RentalError::NotFound)));
    }

    #[tokio::test]
    async fn test_inactive_product_is_not_found() {
        let h = harness();
        let mut product = tractor(Uuid::new_v4());
        product.is_active = false;
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(2), "daily"),
            )
            .await;

        assert!(matches!(result, Err(RentalError::NotFound)));
    }

    #[tokio::test]
    async fn test_buyable_product_is_not_rentable() {
        let h = harness();
        let mut product = tractor(Uuid::new_v4());
        product.product_type = ProductType::Buyable;
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(2), "daily"),
            )
            .await;

        assert!(matches!(result, Err(RentalError::ProductNotRentable)));
    }

    #[tokio::test]
    async fn test_past_start_rejected_before_any_write() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(
                    product_id,
                    today - Duration::days(1),
                    today + Duration::days(2),
                    "daily",
                ),
            )
            .await;

        assert!(matches!(result, Err(RentalError::InvalidDateRange(_))));
        assert_eq!(h.rentals.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_rate_type_rejected() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(2), "hourly"),
            )
            .await;

        assert!(matches!(result, Err(RentalError::InvalidRateType(_))));
        assert_eq!(h.rentals.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_min_max_duration_enforced() {
        let h = harness();
        let mut product = tractor(Uuid::new_v4());
        product.min_rental_days = Some(3);
        product.max_rental_days = Some(10);
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();

        let too_short = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(2), "daily"),
            )
            .await;
        assert!(matches!(too_short, Err(RentalError::DurationTooShort(3))));

        let too_long = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(11), "daily"),
            )
            .await;
        assert!(matches!(too_long, Err(RentalError::DurationTooLong(10))));
    }

    #[tokio::test]
    async fn test_overlapping_booking_rejected_without_side_effects() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        h.orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(4), "daily"),
            )
            .await
            .unwrap();

        // Second request overlaps the tail of the first
        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(
                    product_id,
                    today + Duration::days(4),
                    today + Duration::days(8),
                    "daily",
                ),
            )
            .await;

        assert!(matches!(result, Err(RentalError::DatesUnavailable)));
        assert_eq!(h.rentals.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_blocked_date_rejects_booking() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        h.rentals
            .set_availability(product_id, today + Duration::days(1), false)
            .await
            .unwrap();

        let result = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(product_id, today, today + Duration::days(3), "daily"),
            )
            .await;

        assert!(matches!(result, Err(RentalError::DatesUnavailable)));
        assert_eq!(h.rentals.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_booking_after_blocked_window_succeeds() {
        let h = harness();
        let product = tractor(Uuid::new_v4());
        let product_id = product.id;
        h.catalog.insert(product);

        let today = h.clock.today();
        h.rentals
            .set_availability(product_id, today, false)
            .await
            .unwrap();

        let booking = h
            .orchestrator
            .create_booking(
                Uuid::new_v4(),
                request(
                    product_id,
                    today + Duration::days(1),
                    today + Duration::days(3),
                    "daily",
                ),
            )
            .await
            .unwrap();

        assert_eq!(booking.total_days, 2);
    }
}
