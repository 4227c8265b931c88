//! Timestamps as the backend emits them.
//!
//! Most records carry ISO-8601 strings without a zone
//! (`2025-04-01T10:30:00`), while order creation times arrive as epoch
//! milliseconds. [`Timestamp`] accepts both.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A point in time in one of the backend's encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch (UTC).
    Millis(i64),
    /// Zone-less local date-time.
    Local(NaiveDateTime),
    /// Anything else, kept verbatim.
    Text(String),
}

impl Timestamp {
    /// Best-effort conversion to a naive date-time.
    ///
    /// Epoch milliseconds are interpreted as UTC. Returns `None` for
    /// unparseable text.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
            Self::Local(dt) => Some(*dt),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.naive_utc())
                .ok()
                .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok()),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.to_naive(), self) {
            (Some(dt), _) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            (None, Self::Text(text)) => f.write_str(text),
            (None, Self::Millis(ms)) => write!(f, "{ms}"),
            (None, Self::Local(dt)) => write!(f, "{dt}"),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Local(dt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_string() {
        let ts: Timestamp = serde_json::from_str("\"2025-04-01T10:30:00\"").unwrap();
        assert!(matches!(ts, Timestamp::Local(_)));
        assert_eq!(ts.to_string(), "2025-04-01 10:30:00");
    }

    #[test]
    fn test_epoch_millis() {
        let ts: Timestamp = serde_json::from_str("1743503400000").unwrap();
        assert!(matches!(ts, Timestamp::Millis(_)));
        assert_eq!(ts.to_string(), "2025-04-01 10:30:00");
    }

    #[test]
    fn test_rfc3339_text() {
        let ts: Timestamp = serde_json::from_str("\"2025-04-01T10:30:00.000+00:00\"").unwrap();
        assert_eq!(ts.to_string(), "2025-04-01 10:30:00");
    }

    #[test]
    fn test_unparseable_text_kept_verbatim() {
        let ts: Timestamp = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(ts, Timestamp::Text("yesterday".to_string()));
        assert_eq!(ts.to_naive(), None);
        assert_eq!(ts.to_string(), "yesterday");
    }
}
