//! Due-date parsing for command arguments and interactive prompts.
//!
//! # Responsibility
//! - Accept the date formats users actually type (`2024-01-02`,
//!   `2024-01-02T17:30:00`, `2024-01-02 17:30:00`) and turn them into a
//!   [`NaiveDateTime`].
//! - Provide the suggested due date for new items (tomorrow, same time).

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Parses a user-supplied due date, trying each accepted format in turn.
/// A date without a time component resolves to midnight.
pub fn parse_datetime(value: &str) -> eyre::Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(parsed);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(parsed) = date.and_hms_opt(0, 0, 0) {
            return Ok(parsed);
        }
    }

    eyre::bail!(
        "invalid due date '{value}'; use YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD HH:MM:SS"
    )
}

/// Same parser with a clap-compatible error type, for `value_parser`.
pub fn parse_datetime_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(value).map_err(|err| err.to_string())
}

/// Suggested due date for new items: one day from now, truncated to whole
/// seconds so the value matches what the prompt displays.
pub fn default_due_date() -> NaiveDateTime {
    let tomorrow = Local::now().naive_local() + Duration::days(1);
    tomorrow.with_nanosecond(0).unwrap_or(tomorrow)
}

/// Renders a due date the way [`parse_datetime`] accepts it back.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_datetime() {
        let parsed = parse_datetime("2024-01-02T17:30:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-01-02T17:30:00");
    }

    #[test]
    fn parses_space_separated_datetime() {
        let parsed = parse_datetime("2024-01-02 17:30:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-01-02T17:30:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let parsed = parse_datetime("2024-01-02").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-01-02T00:00:00");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let parsed = parse_datetime("  2024-01-02  ").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-01-02T00:00:00");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(parse_datetime("02/01/2024").is_err());
        assert!(parse_datetime("tomorrow").is_err());
        assert!(parse_datetime("").is_err());
    }

    #[test]
    fn arg_parser_reports_the_offending_value() {
        let message = parse_datetime_arg("soon").unwrap_err();
        assert!(message.contains("soon"));
    }

    #[test]
    fn default_due_date_has_whole_seconds() {
        assert_eq!(default_due_date().nanosecond(), 0);
    }

    #[test]
    fn default_due_date_round_trips_through_the_parser() {
        let default = default_due_date();
        let reparsed = parse_datetime(&format_datetime(&default)).unwrap();
        assert_eq!(reparsed, default);
    }
}
