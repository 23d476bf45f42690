use chrono::NaiveDate;

use crate::dates::DayKey;
use crate::error::ApiError;

pub const MAX_LISTING_LIMIT: u8 = 50;

pub fn validate_limit(value: u8) -> Result<u8, ApiError> {
    if (1..=MAX_LISTING_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_LISTING_LIMIT}"
        )))
    }
}

pub fn parse_day(value: &str) -> Result<NaiveDate, ApiError> {
    value
        .parse::<DayKey>()
        .map(|day| day.date())
        .map_err(|_| ApiError::BadRequest("date must be formatted as YYYY-MM-DD".into()))
}
