//! Legacy date normalization to ISO 8601.
//!
//! The legacy exports store dates day-first (`05/08/2022`, `05-08-2022`),
//! optionally followed by a time suffix (`T10:15:00.000Z`). The first ten
//! characters hold the date part; whatever follows is carried over verbatim
//! and validated together with the reassembled date.
//!
//! Normalization is idempotent: a value that already starts with a
//! four-digit year keeps its component order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use migrate_model::InvalidDate;

/// Number of leading characters that hold the date part.
const DATE_PART_LEN: usize = 10;

/// Date-time layouts accepted after reassembly, without a zone (read as UTC).
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts with an explicit offset (RFC 3339 needs seconds).
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Rewrite a day-first date as `year-month-day`, keeping the time suffix.
///
/// - `05/08/2022T10:15:00.000Z` becomes `2022-08-05T10:15:00.000Z`
/// - `05-08-2022` becomes `2022-08-05`
/// - `2022-08-05` is returned unchanged
///
/// The error carries the original string.
pub fn normalize_date(raw: &str) -> Result<String, InvalidDate> {
    let value = raw.trim();
    let split = value
        .char_indices()
        .nth(DATE_PART_LEN)
        .map_or(value.len(), |(idx, _)| idx);
    let (date_part, remainder) = value.split_at(split);

    let unified = date_part.replace('/', "-");
    let components: Vec<&str> = unified.split('-').collect();
    let [first, month, last] = components.as_slice() else {
        return Err(InvalidDate::new(raw));
    };

    let (year, day) = if is_year(first) {
        (*first, *last)
    } else {
        (*last, *first)
    };
    if !is_year(year) || !is_day_or_month(month) || !is_day_or_month(day) {
        return Err(InvalidDate::new(raw));
    }

    let iso = format!("{year}-{month:0>2}-{day:0>2}{remainder}");
    match parse_timestamp(&iso) {
        Some(_) => Ok(iso),
        None => Err(InvalidDate::new(raw)),
    }
}

/// Parse an ISO 8601 date or date-time into an instant.
///
/// Date-only values are midnight UTC; values without a zone are read as UTC.
pub fn to_timestamp(iso: &str) -> Result<DateTime<Utc>, InvalidDate> {
    parse_timestamp(iso.trim()).ok_or_else(|| InvalidDate::new(iso))
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a legacy date and render it as a full UTC timestamp.
///
/// This is the form stored in the `DataTime` fields.
pub fn canonical_timestamp(raw: &str) -> Result<String, InvalidDate> {
    let iso = normalize_date(raw)?;
    let timestamp = to_timestamp(&iso).map_err(|_| InvalidDate::new(raw))?;
    Ok(format_timestamp(timestamp))
}

fn is_year(component: &str) -> bool {
    component.len() == 4 && component.chars().all(|ch| ch.is_ascii_digit())
}

fn is_day_or_month(component: &str) -> bool {
    (1..=2).contains(&component.len()) && component.chars().all(|ch| ch.is_ascii_digit())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    for fmt in &NAIVE_DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(timestamp.and_utc());
        }
    }

    for fmt in &OFFSET_DATETIME_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(value, fmt) {
            return Some(timestamp.with_timezone(&Utc));
        }
    }

    None
}
