//! Completion timestamps as written by each source.
//!
//! Graph reports `completedDateTime.dateTime` like `2022-08-02T00:00:00.0000000`
//! (UTC, seven fractional digits). Taskwarrior exports `end` as
//! `20220802T000000Z`. Both are reduced to whole seconds so they compare.

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::error::CoreError;

const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Parse a Graph `dateTime` value, interpreted in UTC.
pub fn parse_remote(value: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive).trunc_subsecs(0))
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a Taskwarrior date attribute.
pub fn parse_local(value: &str) -> Result<DateTime<Utc>, CoreError> {
    NaiveDateTime::parse_from_str(value, LOCAL_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Render a timestamp the way Taskwarrior exports it.
pub fn format_local(value: &DateTime<Utc>) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_and_local_agree() {
        let remote = parse_remote("2022-08-02T13:45:10.1234567").unwrap();
        let local = parse_local("20220802T134510Z").unwrap();
        assert_eq!(remote, local);
        assert_eq!(format_local(&remote), "20220802T134510Z");
    }

    #[test]
    fn test_remote_rfc3339() {
        let remote = parse_remote("2022-08-02T13:45:10Z").unwrap();
        assert_eq!(format_local(&remote), "20220802T134510Z");
    }

    #[test]
    fn test_invalid_timestamps() {
        assert!(parse_remote("yesterday").is_err());
        assert!(parse_local("2022-08-02").is_err());
    }
}
