use crate::models::{AvailabilityDay, BookingPage, BookingStatus, RentalBooking};
use crate::repository::{ProductRepository, RentalRepository, RepoError};
use async_trait::async_trait;
use chrono::NaiveDate;
use krishi_catalog::Product;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory product catalog, used by tests and local tooling
#[derive(Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<Uuid, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) {
        self.products.lock().unwrap().insert(product.id, product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        Ok(self.products.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
struct RentalState {
    bookings: Vec<RentalBooking>,
    // (product, date) -> is_available
    availability: HashMap<(Uuid, NaiveDate), bool>,
}

/// In-memory rental store. A single mutex over bookings and availability
/// gives `create_booking` the same all-or-nothing behavior the Postgres
/// implementation gets from a transaction.
#[derive(Default)]
pub struct InMemoryRentalStore {
    state: Mutex<RentalState>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().unwrap().bookings.len()
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalStore {
    async fn unavailable_dates(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>, RepoError> {
        let state = self.state.lock().unwrap();
        let mut dates: Vec<NaiveDate> = state
            .availability
            .iter()
            .filter(|((pid, date), available)| {
                *pid == product_id && *date >= start_date && *date <= end_date && !**available
            })
            .map(|((_, date), _)| *date)
            .collect();
        dates.sort();
        Ok(dates)
    }

    async fn create_booking(&self, booking: &RentalBooking) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();

        let dates = crate::availability::dates_in_range(booking.start_date, booking.end_date);
        let conflicts: Vec<NaiveDate> = dates
            .iter()
            .filter(|date| {
                state
                    .availability
                    .get(&(booking.product_id, **date))
                    .map_or(false, |available| !available)
            })
            .copied()
            .collect();

        if !conflicts.is_empty() {
            return Err(RepoError::Conflict(conflicts));
        }

        for date in dates {
            state.availability.insert((booking.product_id, date), false);
        }
        state.bookings.push(booking.clone());

        Ok(())
    }

    async fn list_bookings(
        &self,
        farmer_id: Uuid,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> Result<BookingPage, RepoError> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<RentalBooking> = state
            .bookings
            .iter()
            .filter(|b| b.farmer_id == farmer_id)
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let offset = (page.saturating_sub(1) * limit) as usize;
        let bookings = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Ok(BookingPage { bookings, total })
    }

    async fn availability(
        &self,
        product_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AvailabilityDay>, RepoError> {
        let state = self.state.lock().unwrap();
        let mut days: Vec<AvailabilityDay> = state
            .availability
            .iter()
            .filter(|((pid, date), _)| {
                *pid == product_id
                    && from.map_or(true, |f| *date >= f)
                    && to.map_or(true, |t| *date <= t)
            })
            .map(|((_, date), available)| AvailabilityDay {
                date: *date,
                is_available: *available,
            })
            .collect();
        days.sort_by_key(|d| d.date);
        Ok(days)
    }

    async fn set_availability(
        &self,
        product_id: Uuid,
        date: NaiveDate,
        is_available: bool,
    ) -> Result<AvailabilityDay, RepoError> {
        let mut state = self.state.lock().unwrap();
        state.availability.insert((product_id, date), is_available);
        Ok(AvailabilityDay { date, is_available })
    }
}
