use chrono::{Days, NaiveDate};

/// Every calendar day from `start` to `end` inclusive.
///
/// Blocking covers the end date even though billing counts `end - start`
/// days; the equipment is out with the renter on the return day too.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;

    while current <= end {
        dates.push(current);
        match current.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_of_both_ends() {
        let dates = dates_in_range(date(2025, 6, 1), date(2025, 6, 4));
        assert_eq!(
            dates,
            vec![
                date(2025, 6, 1),
                date(2025, 6, 2),
                date(2025, 6, 3),
                date(2025, 6, 4),
            ]
        );
    }

    #[test]
    fn test_single_day_range() {
        assert_eq!(
            dates_in_range(date(2025, 6, 1), date(2025, 6, 1)),
            vec![date(2025, 6, 1)]
        );
    }

    #[test]
    fn test_crosses_month_boundary() {
        let dates = dates_in_range(date(2025, 6, 29), date(2025, 7, 2));
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[2], date(2025, 7, 1));
    }
}
