use crate::RentalError;
use krishi_catalog::RentalTerms;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Billing period selected for a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    Daily,
    Weekly,
    Monthly,
}

impl RateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Daily => "daily",
            RateType::Weekly => "weekly",
            RateType::Monthly => "monthly",
        }
    }
}

impl FromStr for RateType {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RateType::Daily),
            "weekly" => Ok(RateType::Weekly),
            "monthly" => Ok(RateType::Monthly),
            other => Err(RentalError::InvalidRateType(other.to_string())),
        }
    }
}

/// Priced outcome for a validated range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuote {
    pub rate_per_period: i64,
    pub total_amount: i64,
    pub deposit_amount: i64,
}

/// Compute the rate snapshot, total and deposit for a rental.
///
/// Weeks and months are fixed 7- and 30-day buckets rounded up, not true
/// calendar periods; an unset per-period price prices as 0. Deliberate
/// billing policy, carried over as-is.
pub fn resolve_quote(rate_type: RateType, terms: &RentalTerms, total_days: i32) -> BookingQuote {
    let days = i64::from(total_days);

    let (rate_per_period, periods) = match rate_type {
        RateType::Daily => (terms.price_per_day.unwrap_or(0), days),
        RateType::Weekly => (
            terms.price_per_week.unwrap_or(0),
            days / 7 + (days % 7 > 0) as i64,
        ),
        RateType::Monthly => (
            terms.price_per_month.unwrap_or(0),
            days / 30 + (days % 30 > 0) as i64,
        ),
    };

    let deposit_amount = if terms.requires_deposit {
        terms.deposit_amount.unwrap_or(0)
    } else {
        0
    };

    BookingQuote {
        rate_per_period,
        total_amount: rate_per_period * periods,
        deposit_amount,
    }
}
