use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub trait AsNaive {
    fn as_naive(&self) -> NaiveDateTime;
}

impl AsNaive for NaiveDateTime {
    fn as_naive(&self) -> NaiveDateTime {
        *self
    }
}

impl<T: TimeZone> AsNaive for DateTime<T> {
    fn as_naive(&self) -> NaiveDateTime {
        self.naive_utc()
    }
}

pub fn format_timestamp(date: impl AsNaive) -> String {
    date.as_naive().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a confirmation timestamp as returned by the blockchain API.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC)
/// and a bare `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Human readable form of an API timestamp, falling back to the raw text.
pub fn display_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(parsed) => format!("{} UTC", format_timestamp(parsed)),
        None => raw.to_string(),
    }
}
