//! Unix-epoch timestamps as the OpenWeatherMap API sends them.
//!
//! The service encodes `dt`, `sys.sunrise` and `sys.sunset` as bare JSON
//! integers of seconds since 1970-01-01T00:00:00Z rather than as date-time
//! strings, so these fields get their own decoding rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTime(DateTime<Utc>);

impl UnixTime {
    /// Decode a raw JSON token, exactly as it appears in the document.
    ///
    /// The token must be a base-10 integer literal. A quoted string, a
    /// float or `null` is rejected.
    pub fn from_token(token: &[u8]) -> Result<Self, DecodeError> {
        let text = String::from_utf8_lossy(token);
        let secs = text
            .trim()
            .parse::<i64>()
            .map_err(|source| DecodeError::InvalidTimestamp { token: text.to_string(), source })?;

        Self::from_secs(secs)
    }

    pub fn from_secs(secs: i64) -> Result<Self, DecodeError> {
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(UnixTime)
            .ok_or(DecodeError::TimestampOutOfRange(secs))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for UnixTime {
    fn default() -> Self {
        UnixTime(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl From<UnixTime> for DateTime<Utc> {
    fn from(value: UnixTime) -> Self {
        value.0
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UnixTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Capture the token unparsed so a quoted "1511561700" is not accepted.
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        UnixTime::from_token(raw.get().as_bytes()).map_err(serde::de::Error::custom)
    }
}

impl Serialize for UnixTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        chrono::serde::ts_seconds::serialize(&self.0, serializer)
    }
}
