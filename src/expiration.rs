//! Nearest weekly expiration resolution
//!
//! Weekly options expire on Fridays. The resolver is plain calendar
//! arithmetic: no exchange holidays, no timezones.

use crate::error::{QuoteError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

const EXPIRATION_FORMAT: &str = "%Y-%m-%d";

/// Friday on or after `as_of`. A Friday resolves to itself.
///
/// Fails only when that Friday lies past the end of the calendar.
pub fn resolve_next_friday(as_of: NaiveDate) -> Result<NaiveDate> {
    // Monday = 0 .. Sunday = 6, Friday = 4
    let weekday = as_of.weekday().num_days_from_monday() as i64;
    let offset = (4 - weekday).rem_euclid(7);
    as_of
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(|| QuoteError::ParseError(format!("No Friday on or after {}", as_of)))
}

/// Check `candidate` against the instrument's published expirations.
pub fn validate_expiration(candidate: NaiveDate, available: &[NaiveDate]) -> Result<NaiveDate> {
    if available.contains(&candidate) {
        Ok(candidate)
    } else {
        debug!(
            "Expiration {} not among {} published dates",
            format_expiration(candidate),
            available.len()
        );
        Err(QuoteError::UnavailableExpiration { date: candidate })
    }
}

/// Parse provider expiration strings (`YYYY-MM-DD`).
pub fn parse_expiration_dates<S: AsRef<str>>(dates: &[S]) -> Result<Vec<NaiveDate>> {
    dates
        .iter()
        .map(|d| {
            let d = d.as_ref();
            NaiveDate::parse_from_str(d.trim(), EXPIRATION_FORMAT)
                .map_err(|e| QuoteError::ParseError(format!("Invalid expiration date '{}': {}", d, e)))
        })
        .collect()
}

pub fn format_expiration(date: NaiveDate) -> String {
    date.format(EXPIRATION_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn friday_resolves_to_itself() {
        assert_eq!(resolve_next_friday(ymd(2025, 1, 3)).unwrap(), ymd(2025, 1, 3));
    }

    #[test]
    fn monday_resolves_to_same_week_friday() {
        assert_eq!(resolve_next_friday(ymd(2025, 1, 6)).unwrap(), ymd(2025, 1, 10));
    }

    #[test]
    fn weekend_rolls_into_next_week() {
        assert_eq!(resolve_next_friday(ymd(2025, 1, 4)).unwrap(), ymd(2025, 1, 10));
        assert_eq!(resolve_next_friday(ymd(2025, 1, 5)).unwrap(), ymd(2025, 1, 10));
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        assert_eq!(resolve_next_friday(ymd(2024, 12, 28)).unwrap(), ymd(2025, 1, 3));
        assert_eq!(resolve_next_friday(ymd(2025, 1, 31)).unwrap(), ymd(2025, 1, 31));
        assert_eq!(resolve_next_friday(ymd(2025, 2, 1)).unwrap(), ymd(2025, 2, 7));
    }

    #[test]
    fn every_weekday_lands_on_friday_within_a_week() {
        let start = ymd(2025, 1, 6);
        for i in 0..7 {
            let d = start + Duration::days(i);
            let f = resolve_next_friday(d).unwrap();
            assert_eq!(f.weekday(), Weekday::Fri);
            assert!(f >= d);
            assert!((f - d).num_days() < 7);
        }
    }

    #[test]
    fn end_of_calendar_is_an_error_not_a_panic() {
        // the calendar ends on a Tuesday, so its last Saturday has no Friday after it
        let mut d = NaiveDate::MAX;
        while d.weekday() != Weekday::Sat {
            d = d.pred_opt().unwrap();
        }
        assert!(matches!(resolve_next_friday(d), Err(QuoteError::ParseError(_))));
        assert!(resolve_next_friday(d.pred_opt().unwrap()).is_ok());
    }

    #[test]
    fn validate_accepts_published_date() {
        let available = vec![ymd(2025, 1, 3), ymd(2025, 1, 10)];
        assert_eq!(validate_expiration(ymd(2025, 1, 10), &available).unwrap(), ymd(2025, 1, 10));
    }

    #[test]
    fn validate_rejects_missing_date_with_actionable_message() {
        let available = vec![ymd(2025, 1, 3)];
        let err = validate_expiration(ymd(2025, 1, 10), &available).unwrap_err();
        assert!(matches!(err, QuoteError::UnavailableExpiration { date } if date == ymd(2025, 1, 10)));
        assert_eq!(
            err.to_string(),
            "No options data available for 2025-01-10. Try another date."
        );
    }

    #[test]
    fn validate_against_empty_list_fails() {
        assert!(validate_expiration(ymd(2025, 1, 10), &[]).is_err());
    }

    #[test]
    fn parses_provider_date_strings() {
        let parsed = parse_expiration_dates(&["2025-01-03", "2025-01-10"]).unwrap();
        assert_eq!(parsed, vec![ymd(2025, 1, 3), ymd(2025, 1, 10)]);
        assert!(parse_expiration_dates(&["01/10/2025"]).is_err());
        assert_eq!(format_expiration(ymd(2025, 1, 3)), "2025-01-03");
    }
}
