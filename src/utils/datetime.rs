//! Date/time normalization for client-supplied strings.
//!
//! Two flavours exist: [`parse_flexible`] for optional secondary dates
//! (check-in/check-out on receipts and activities), which silently drops
//! anything it cannot read, and [`parse_strict`] for the dates a record
//! cannot exist without, which reports a validation error instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

type Parser = fn(&str) -> Option<DateTime<Utc>>;

/// RFC 3339 (with or without fractional seconds), date only, then a
/// zoneless date-time. First match wins.
const FLEXIBLE_PARSERS: [Parser; 3] = [parse_rfc3339, parse_date, parse_local_date_time];

const STRICT_PARSERS: [Parser; 2] = [parse_rfc3339, parse_date];

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Zoneless input is read as UTC.
fn parse_local_date_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, LOCAL_DATE_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse an optional date, returning `None` for missing, blank or
/// unparsable input.
pub fn parse_flexible(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    FLEXIBLE_PARSERS.iter().find_map(|parse| parse(value))
}

/// Parse a required date. Accepts RFC 3339 or `YYYY-MM-DD`; `field` names
/// the offending input in the error message.
pub fn parse_strict(value: &str, field: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();
    STRICT_PARSERS
        .iter()
        .find_map(|parse| parse(value))
        .ok_or_else(|| {
            DomainError::validation(format!(
                "Invalid {} format. Expected format: YYYY-MM-DD or ISO 8601 (with or without milliseconds)",
                field
            ))
        })
}

/// Storage representation of an instant (RFC 3339 text column)
pub fn to_storage(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// [`parse_flexible`] followed by [`to_storage`]
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    parse_flexible(value).map(to_storage)
}
