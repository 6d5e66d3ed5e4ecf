//! Date parsing and display helpers

use chrono::{DateTime, Local, TimeZone};

/// Shown when a post carries no usable date at all
pub const DATE_UNAVAILABLE: &str = "Date not available";

/// Parse a date string in the formats posts commonly use
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
    ];

    for fmt in formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    // RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

/// Human-readable date (like "January 1, 2024").
///
/// Falls back to the raw string when it cannot be parsed, or to a fixed
/// placeholder when the raw string is empty.
pub fn display_date(raw: &str) -> String {
    match parse_date_string(raw) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None if raw.trim().is_empty() => DATE_UNAVAILABLE.to_string(),
        None => raw.to_string(),
    }
}

/// Total sort key over date strings.
///
/// Unparseable dates pin to the Unix epoch so they land in a fixed
/// position of any ordering.
pub fn sort_key(raw: &str) -> DateTime<Local> {
    parse_date_string(raw).unwrap_or_else(|| DateTime::<Local>::from(std::time::UNIX_EPOCH))
}

/// The current time as an ISO-8601 string, used when a post omits `date`
pub fn now_iso() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_common_formats() {
        for s in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
        ] {
            let dt = parse_date_string(s).unwrap_or_else(|| panic!("failed to parse {s}"));
            assert_eq!(dt.year(), 2024);
            assert_eq!(dt.month(), 1);
            assert_eq!(dt.day(), 15);
        }
        // Offset forms parse too; the calendar day depends on the local zone
        assert!(parse_date_string("2024-01-15T10:30:00+09:00").is_some());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-15"), "January 15, 2024");
        assert_eq!(display_date("2024-06-01"), "June 1, 2024");
    }

    #[test]
    fn test_display_date_falls_back_to_raw() {
        assert_eq!(display_date("someday soon"), "someday soon");
    }

    #[test]
    fn test_display_date_placeholder_when_empty() {
        assert_eq!(display_date(""), DATE_UNAVAILABLE);
        assert_eq!(display_date("   "), DATE_UNAVAILABLE);
    }

    #[test]
    fn test_sort_key_is_total() {
        let valid = sort_key("2024-01-15");
        let junk = sort_key("not a date");
        assert!(junk < valid);
        assert_eq!(junk, sort_key("also not a date"));
    }

    #[test]
    fn test_now_iso_round_trips() {
        assert!(parse_date_string(&now_iso()).is_some());
    }
}
