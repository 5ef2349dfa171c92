use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::SpendwatchError;

pub const MAX_CAMPAIGN_NAME_LENGTH: usize = 200;
pub const MAX_DAYS_IN_MONTH: u32 = 31;

/// Validate a calendar date in YYYY-MM-DD format.
pub fn validate_date(input: &str) -> Result<NaiveDate, SpendwatchError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        SpendwatchError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2025-12-01)",
            trimmed
        ))
    })
}

/// Validate a month in YYYY-MM format, returning `(year, month)`.
pub fn validate_month(input: &str) -> Result<(i32, u32), SpendwatchError> {
    let trimmed = input.trim();
    let invalid = || {
        SpendwatchError::InvalidInput(format!(
            "invalid month '{}'. Expected format: YYYY-MM (e.g., 2025-12)",
            trimmed
        ))
    };
    let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    Ok((year, month))
}

/// Validate a comparison tolerance: must be strictly positive.
pub fn validate_tolerance(tolerance: Decimal) -> Result<Decimal, SpendwatchError> {
    if tolerance <= Decimal::ZERO {
        return Err(SpendwatchError::InvalidInput(format!(
            "tolerance must be greater than 0, got {}",
            tolerance
        )));
    }
    Ok(tolerance)
}

/// Validate an expected total: must not be negative.
pub fn validate_expected(expected: Decimal) -> Result<Decimal, SpendwatchError> {
    if expected.is_sign_negative() {
        return Err(SpendwatchError::InvalidInput(format!(
            "expected total cannot be negative, got {}",
            expected
        )));
    }
    Ok(expected)
}

/// Validate a campaign name filter: trimmed, non-empty, bounded length.
pub fn validate_campaign_name(input: &str) -> Result<String, SpendwatchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SpendwatchError::InvalidInput(
            "campaign name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_CAMPAIGN_NAME_LENGTH {
        return Err(SpendwatchError::InvalidInput(format!(
            "campaign name too long (max {} characters)",
            MAX_CAMPAIGN_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a day count within a month: must be 1..=31.
pub fn validate_day_count(days: u32) -> Result<u32, SpendwatchError> {
    if !(1..=MAX_DAYS_IN_MONTH).contains(&days) {
        return Err(SpendwatchError::InvalidInput(format!(
            "days must be between 1 and {}, got {}",
            MAX_DAYS_IN_MONTH, days
        )));
    }
    Ok(days)
}

/// Validate how many leading days to preview per campaign: must be 1..=31.
pub fn validate_preview_days(days: usize) -> Result<usize, SpendwatchError> {
    if !(1..=MAX_DAYS_IN_MONTH as usize).contains(&days) {
        return Err(SpendwatchError::InvalidInput(format!(
            "preview days must be between 1 and {}, got {}",
            MAX_DAYS_IN_MONTH, days
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Date validation --

    #[test]
    fn date_valid() {
        let d = validate_date("2025-12-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    }

    #[test]
    fn date_with_whitespace() {
        let d = validate_date("  2025-12-31  ").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn date_invalid_format() {
        assert!(validate_date("12/01/2025").is_err());
        assert!(validate_date("not-a-date").is_err());
    }

    #[test]
    fn date_impossible_day() {
        assert!(validate_date("2025-02-30").is_err());
    }

    // -- Month validation --

    #[test]
    fn month_valid() {
        assert_eq!(validate_month("2025-12").unwrap(), (2025, 12));
        assert_eq!(validate_month(" 2024-02 ").unwrap(), (2024, 2));
        assert_eq!(validate_month("2024-2").unwrap(), (2024, 2));
    }

    #[test]
    fn month_out_of_range() {
        assert!(validate_month("2025-13").is_err());
        assert!(validate_month("2025-00").is_err());
    }

    #[test]
    fn month_bad_format() {
        assert!(validate_month("202512").is_err());
        assert!(validate_month("2025-12-01").is_err());
        assert!(validate_month("25-12").is_err());
        assert!(validate_month("abcd-ef").is_err());
        assert!(validate_month("").is_err());
    }

    // -- Tolerance / expected --

    #[test]
    fn tolerance_positive() {
        assert_eq!(validate_tolerance(Decimal::new(100, 0)).unwrap(), Decimal::new(100, 0));
        assert_eq!(validate_tolerance(Decimal::new(1, 2)).unwrap(), Decimal::new(1, 2));
    }

    #[test]
    fn tolerance_zero_or_negative() {
        assert!(validate_tolerance(Decimal::ZERO).is_err());
        assert!(validate_tolerance(Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn expected_non_negative() {
        assert!(validate_expected(Decimal::ZERO).is_ok());
        assert!(validate_expected(Decimal::new(109130, 0)).is_ok());
        assert!(validate_expected(Decimal::new(-1, 0)).is_err());
    }

    // -- Campaign name --

    #[test]
    fn campaign_name_trimmed() {
        assert_eq!(
            validate_campaign_name("  Кабель КГ 2*2,5 ").unwrap(),
            "Кабель КГ 2*2,5"
        );
    }

    #[test]
    fn campaign_name_empty() {
        assert!(validate_campaign_name("").is_err());
        assert!(validate_campaign_name("   ").is_err());
    }

    #[test]
    fn campaign_name_too_long() {
        let long = "к".repeat(MAX_CAMPAIGN_NAME_LENGTH + 1);
        assert!(validate_campaign_name(&long).is_err());
        let max = "к".repeat(MAX_CAMPAIGN_NAME_LENGTH);
        assert!(validate_campaign_name(&max).is_ok());
    }

    // -- Day counts --

    #[test]
    fn day_count_bounds() {
        assert_eq!(validate_day_count(1).unwrap(), 1);
        assert_eq!(validate_day_count(31).unwrap(), 31);
        assert!(validate_day_count(0).is_err());
        assert!(validate_day_count(32).is_err());
    }

    #[test]
    fn preview_days_bounds() {
        assert_eq!(validate_preview_days(3).unwrap(), 3);
        assert!(validate_preview_days(0).is_err());
        assert!(validate_preview_days(100).is_err());
    }

    #[test]
    fn error_message_mentions_input() {
        let err = validate_month("2025-13").unwrap_err();
        assert!(err.to_string().contains("2025-13"));
        assert!(err.to_string().starts_with("Invalid input"));
    }
}
