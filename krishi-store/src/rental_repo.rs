use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use krishi_rental::availability::dates_in_range;
use krishi_rental::models::{AvailabilityDay, BookingPage, BookingStatus, RentalBooking};
use krishi_rental::pricing::RateType;
use krishi_rental::repository::{RentalRepository, RepoError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgRentalRepository {
    pool: PgPool,
}

impl PgRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    farmer_id: Uuid,
    provider_id: Uuid,
    product_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_days: i32,
    rental_rate_type: String,
    rate_per_period: i64,
    total_amount: i64,
    deposit_amount: i64,
    status: String,
    delivery_address: Option<serde_json::Value>,
    pickup_address: Option<serde_json::Value>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    date: NaiveDate,
    is_available: bool,
}

impl BookingRow {
    fn into_booking(self) -> Result<RentalBooking, RepoError> {
        let rental_rate_type: RateType = self
            .rental_rate_type
            .parse()
            .map_err(RepoError::storage)?;
        let status: BookingStatus = self.status.parse().map_err(RepoError::storage)?;

        Ok(RentalBooking {
            id: self.id,
            farmer_id: self.farmer_id,
            provider_id: self.provider_id,
            product_id: self.product_id,
            start_date: self.start_date,
            end_date: self.end_date,
            total_days: self.total_days,
            rental_rate_type,
            rate_per_period: self.rate_per_period,
            total_amount: self.total_amount,
            deposit_amount: self.deposit_amount,
            status,
            delivery_address: self.delivery_address,
            pickup_address: self.pickup_address,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn unavailable_dates(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>, RepoError> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT date FROM rental_availability
            WHERE product_id = $1 AND date >= $2 AND date <= $3 AND is_available = FALSE
            ORDER BY date
            "#,
        )
        .bind(product_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        Ok(dates)
    }

    async fn create_booking(&self, booking: &RentalBooking) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(RepoError::storage)?;

        sqlx::query(
            r#"
            INSERT INTO rental_bookings
                (id, farmer_id, provider_id, product_id, start_date, end_date,
                 total_days, rental_rate_type, rate_per_period, total_amount,
                 deposit_amount, status, delivery_address, pickup_address, notes,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(booking.id)
        .bind(booking.farmer_id)
        .bind(booking.provider_id)
        .bind(booking.product_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_days)
        .bind(booking.rental_rate_type.as_str())
        .bind(booking.rate_per_period)
        .bind(booking.total_amount)
        .bind(booking.deposit_amount)
        .bind(booking.status.as_str())
        .bind(&booking.delivery_address)
        .bind(&booking.pickup_address)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::storage)?;

        // Claim each day under the (product_id, date) primary key. The
        // conditional upsert only succeeds while the row is still
        // available; a concurrent booking that already claimed the date
        // makes it affect zero rows, which rolls the whole booking back.
        for date in dates_in_range(booking.start_date, booking.end_date) {
            let result = sqlx::query(
                r#"
                INSERT INTO rental_availability (product_id, date, is_available)
                VALUES ($1, $2, FALSE)
                ON CONFLICT (product_id, date)
                DO UPDATE SET is_available = FALSE, updated_at = NOW()
                WHERE rental_availability.is_available
                "#,
            )
            .bind(booking.product_id)
            .bind(date)
            .execute(&mut *tx)
            .await
            .map_err(RepoError::storage)?;

            if result.rows_affected() == 0 {
                tx.rollback().await.map_err(RepoError::storage)?;
                return Err(RepoError::Conflict(vec![date]));
            }
        }

        tx.commit().await.map_err(RepoError::storage)?;
        Ok(())
    }

    async fn list_bookings(
        &self,
        farmer_id: Uuid,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> Result<BookingPage, RepoError> {
        let status_str = status.map(|s| s.as_str());
        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM rental_bookings
            WHERE farmer_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            "#,
        )
        .bind(farmer_id)
        .bind(status_str)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, farmer_id, provider_id, product_id, start_date, end_date,
                   total_days, rental_rate_type, rate_per_period, total_amount,
                   deposit_amount, status, delivery_address, pickup_address, notes,
                   created_at, updated_at
            FROM rental_bookings
            WHERE farmer_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(farmer_id)
        .bind(status_str)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        let bookings = rows
            .into_iter()
            .map(BookingRow::into_booking)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BookingPage { bookings, total })
    }

    async fn availability(
        &self,
        product_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AvailabilityDay>, RepoError> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT date, is_available FROM rental_availability
            WHERE product_id = $1
              AND ($2::DATE IS NULL OR date >= $2)
              AND ($3::DATE IS NULL OR date <= $3)
            ORDER BY date
            "#,
        )
        .bind(product_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        Ok(rows
            .into_iter()
            .map(|row| AvailabilityDay {
                date: row.date,
                is_available: row.is_available,
            })
            .collect())
    }

    async fn set_availability(
        &self,
        product_id: Uuid,
        date: NaiveDate,
        is_available: bool,
    ) -> Result<AvailabilityDay, RepoError> {
        let row = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            INSERT INTO rental_availability (product_id, date, is_available)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, date)
            DO UPDATE SET is_available = $3, updated_at = NOW()
            RETURNING date, is_available
            "#,
        )
        .bind(product_id)
        .bind(date)
        .bind(is_available)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        Ok(AvailabilityDay {
            date: row.date,
            is_available: row.is_available,
        })
    }
}
