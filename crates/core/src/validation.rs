//! Field rules shared by every entity.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Longest accepted title.
pub const MAX_TITLE_LEN: usize = 200;

/// Rejects blank text.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

/// Rejects text whose character count is outside `min..=max`.
pub fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        Err(ValidationError::Length { field, min, max })
    } else {
        Ok(())
    }
}

/// Rejects a title that is blank or longer than [`MAX_TITLE_LEN`].
pub fn check_title(value: &str) -> Result<(), ValidationError> {
    require_text("title", value)?;
    check_length("title", value, 1, MAX_TITLE_LEN)
}

/// Rejects a negative amount; absent amounts pass.
pub fn non_negative(field: &'static str, value: Option<Decimal>) -> Result<(), ValidationError> {
    match value {
        Some(amount) if amount.is_sign_negative() && !amount.is_zero() => {
            Err(ValidationError::Negative { field })
        }
        _ => Ok(()),
    }
}

/// Decimal places kept for amounts, budgets and costs.
pub const AMOUNT_SCALE: u32 = 4;

/// Amounts must stay below 10^15 (15 integer digits).
pub const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

/// Decimal places kept for exchange rates.
pub const RATE_SCALE: u32 = 10;

/// Exchange rates must stay below 10^9 (9 integer digits).
pub const RATE_LIMIT: i64 = 1_000_000_000;

/// Rejects a value with more than `max_scale` decimal places or not below `limit`.
fn check_storable(
    field: &'static str,
    value: Decimal,
    max_scale: u32,
    limit: i64,
) -> Result<(), ValidationError> {
    if value.abs() >= Decimal::from(limit) {
        return Err(ValidationError::AmountOutOfRange { field });
    }
    if value.normalize().scale() > max_scale {
        return Err(ValidationError::TooPrecise { field, max_scale });
    }
    Ok(())
}

/// Rejects a negative amount, one with more than [`AMOUNT_SCALE`] decimal
/// places, or one not below [`AMOUNT_LIMIT`]. Absent amounts pass.
pub fn check_amount(field: &'static str, value: Option<Decimal>) -> Result<(), ValidationError> {
    non_negative(field, value)?;
    match value {
        Some(amount) => check_storable(field, amount, AMOUNT_SCALE, AMOUNT_LIMIT),
        None => Ok(()),
    }
}

/// Rejects an exchange rate with more than [`RATE_SCALE`] decimal places or
/// not below [`RATE_LIMIT`]. Positivity is checked by the caller.
pub fn check_rate(rate: Decimal) -> Result<(), ValidationError> {
    check_storable("exchange_rate", rate, RATE_SCALE, RATE_LIMIT)
}

/// Rejects `end < start`.
pub fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        Err(ValidationError::DateRange { start, end })
    } else {
        Ok(())
    }
}

/// Rejects `end < start` when both times are present.
pub fn check_time_range(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::TimeRange),
        _ => Ok(()),
    }
}

/// Rejects coordinates outside latitude [-90, 90] / longitude [-180, 180].
pub fn check_coordinates(
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
) -> Result<(), ValidationError> {
    if latitude.is_some_and(|lat| lat.abs() > Decimal::from(90)) {
        return Err(ValidationError::OutOfRange { field: "latitude" });
    }
    if longitude.is_some_and(|lon| lon.abs() > Decimal::from(180)) {
        return Err(ValidationError::OutOfRange { field: "longitude" });
    }
    Ok(())
}
