use chrono::{NaiveDate, Utc};

use crate::error::{AppError, AppResult};

/// Current calendar date (UTC). All "not after today" checks compare against it.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date, rejecting anything else as a validation error.
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    if value.len() != 10 {
        return Err(AppError::Validation(format!("{field} must be a YYYY-MM-DD date")));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_dates_only() {
        assert_eq!(
            parse_date("date", "2024-05-12").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()
        );
        assert!(parse_date("date", "20-05-2024").is_err());
        assert!(parse_date("date", "2024/05/12").is_err());
        assert!(parse_date("date", "").is_err());
    }
}
