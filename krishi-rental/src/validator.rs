use crate::RentalError;
use chrono::NaiveDate;

/// A date range that passed validation, with its billable day count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
}

/// Validate a requested rental range against the lead-time rule and the
/// product's configured span limits. Pure function of its inputs; `today`
/// comes from the caller's clock.
///
/// `total_days` is the calendar-day difference between start and end, not
/// a wall-clock duration. An unset minimum defaults to 1 day; an explicit
/// 0 is honored as 0.
pub fn validate_range(
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    min_rental_days: Option<i32>,
    max_rental_days: Option<i32>,
) -> Result<ValidatedRange, RentalError> {
    if start_date < today {
        return Err(RentalError::InvalidDateRange(
            "Start date cannot be in the past",
        ));
    }

    if end_date <= start_date {
        return Err(RentalError::InvalidDateRange(
            "End date must be after start date",
        ));
    }

    let total_days = (end_date - start_date).num_days() as i32;

    let min_days = min_rental_days.unwrap_or(1);
    if total_days < min_days {
        return Err(RentalError::DurationTooShort(min_days));
    }

    if let Some(max_days) = max_rental_days {
        if total_days > max_days {
            return Err(RentalError::DurationTooLong(max_days));
        }
    }

    Ok(ValidatedRange {
        start_date,
        end_date,
        total_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_day_count() {
        let range = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 1),
            date(2025, 6, 4),
            None,
            None,
        )
        .unwrap();

        assert_eq!(range.total_days, 3);
    }

    #[test]
    fn test_past_start_rejected() {
        let result = validate_range(
            date(2025, 6, 1),
            date(2025, 5, 31),
            date(2025, 6, 4),
            None,
            None,
        );

        assert!(matches!(result, Err(RentalError::InvalidDateRange(_))));
    }

    #[test]
    fn test_end_not_after_start_rejected() {
        // Equal dates
        let result = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 2),
            date(2025, 6, 2),
            None,
            None,
        );
        assert!(matches!(result, Err(RentalError::InvalidDateRange(_))));

        // Inverted
        let result = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 5),
            date(2025, 6, 2),
            None,
            None,
        );
        assert!(matches!(result, Err(RentalError::InvalidDateRange(_))));
    }

    #[test]
    fn test_minimum_days_enforced() {
        let result = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 1),
            date(2025, 6, 3),
            Some(3),
            None,
        );

        assert!(matches!(result, Err(RentalError::DurationTooShort(3))));
    }

    #[test]
    fn test_maximum_days_enforced() {
        let result = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 1),
            date(2025, 6, 12),
            None,
            Some(10),
        );

        assert!(matches!(result, Err(RentalError::DurationTooLong(10))));
    }

    #[test]
    fn test_unset_minimum_defaults_to_one_day() {
        // 1-day span passes with no configured minimum
        let range = validate_range(
            date(2025, 6, 1),
            date(2025, 6, 1),
            date(2025, 6, 2),
            None,
            None,
        )
        .unwrap();
        assert_eq!(range.total_days, 1);
    }

    #[test]
    fn test_booking_starting_today_is_allowed() {
        let today = date(2025, 6, 1);
        assert!(validate_range(today, today, date(2025, 6, 5), None, None).is_ok());
    }
}
