//! Best-effort DateTime handling for parsing feed timestamps and converting
//! to and from Unix time.

use super::*;

/// UTC timestamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<chrono::Utc>);

impl DateTime {
    /// Current time.
    pub fn now() -> Self {
        DateTime(chrono::Utc::now())
    }

    /// The latest representable DateTime.
    /// Used as the cutoff when none is requested.
    pub fn max() -> Self {
        DateTime(chrono::DateTime::<chrono::Utc>::MAX_UTC)
    }

    /// Create from seconds since the unix epoch.
    /// Returns `None` when the timestamp is out of range.
    pub fn from_unix_timestamp(secs: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp(secs, 0).map(DateTime)
    }

    /// Seconds since the unix epoch.
    pub fn unix_timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Convert to an RFC 3339 string, e.g. `2024-01-03T10:00:00Z`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    pub fn from_chrono(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl TryFrom<&str> for DateTime {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let date = value.trim();

        // Atom dates, then RSS dates.
        let with_offset = chrono::DateTime::parse_from_rfc3339(date)
            .or_else(|_| chrono::DateTime::parse_from_rfc2822(date));
        if let Ok(parsed) = with_offset {
            return Ok(DateTime(parsed.to_utc()));
        }

        // Offset-less variants seen in the wild are taken as UTC.
        let formats =
            ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%MZ", "%Y-%m-%d %H:%M:%S"];
        for format in formats {
            if let Ok(parsed) =
                chrono::NaiveDateTime::parse_from_str(date, format)
            {
                return Ok(DateTime(parsed.and_utc()));
            }
        }

        if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        {
            if let Some(parsed) = parsed.and_hms_opt(0, 0, 0) {
                return Ok(DateTime(parsed.and_utc()));
            }
        }

        Err(())
    }
}

impl TryFrom<&String> for DateTime {
    type Error = ();

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        DateTime::try_from(value.as_str())
    }
}
