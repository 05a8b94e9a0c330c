use crate::domain::AvailabilityError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date, dropping any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date is read in the
/// timestamp's own offset) and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_date(input: &str) -> Result<NaiveDate, AvailabilityError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }

    Err(AvailabilityError::malformed(input))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-06-01").unwrap(), ymd(2024, 6, 1));
        assert_eq!(parse_date("  2024-06-01\n").unwrap(), ymd(2024, 6, 1));
    }

    #[test]
    fn test_parse_ignores_time_of_day() {
        assert_eq!(
            parse_date("2024-06-01T00:00:00.000Z").unwrap(),
            ymd(2024, 6, 1)
        );
        assert_eq!(
            parse_date("2024-06-01T23:59:59+02:00").unwrap(),
            ymd(2024, 6, 1)
        );
        assert_eq!(parse_date("2024-06-01T18:30:00").unwrap(), ymd(2024, 6, 1));
        assert_eq!(
            parse_date("2024-06-01 18:30:00.250").unwrap(),
            ymd(2024, 6, 1)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        for input in ["", "tomorrow", "2024-02-30", "2024-13-01", "06/01/2024"] {
            assert_eq!(
                parse_date(input),
                Err(AvailabilityError::malformed(input)),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 1, 9)), "2024-01-09");
    }
}
