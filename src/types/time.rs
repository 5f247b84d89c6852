//! Temporal values accepted by cached content: a relative `Ttl` and an
//! absolute `ExpireTime`.
//!
//! Both accept the loose shapes callers tend to have on hand (std and chrono
//! durations, integer seconds, RFC 3339 strings, `{"seconds", "nanos"}`
//! objects) and serialize to the protobuf JSON forms the API expects.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{GenAiError, GenAiResult};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Relative lifetime of a cached content resource.
///
/// Serialized as a protobuf duration string: `"3600s"`, `"1.5s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(Duration);

/// Lifetime applied to new cached content when neither a TTL nor an expire
/// time is given.
pub const DEFAULT_TTL: Ttl = Ttl(Duration::from_secs(3600));

impl Ttl {
    /// TTL of whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// The wrapped duration.
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Protobuf JSON form, e.g. `"3600s"` or `"0.25s"`.
    pub fn to_proto_string(&self) -> String {
        let secs = self.0.as_secs();
        let nanos = self.0.subsec_nanos();
        if nanos == 0 {
            return format!("{secs}s");
        }
        let frac = format!("{nanos:09}");
        format!("{secs}.{}s", frac.trim_end_matches('0'))
    }

    /// Accepts an integer or float number of seconds, a duration string, or
    /// a `{"seconds": n, "nanos": m}` object.
    pub fn from_json(value: &Value) -> GenAiResult<Self> {
        match value {
            Value::Number(n) => {
                if let Some(secs) = n.as_u64() {
                    return Ok(Self::from_secs(secs));
                }
                n.as_f64()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    .map(Self)
                    .ok_or_else(|| GenAiError::validation("ttl", format!("must be a non-negative duration, got {n}")))
            }
            Value::String(s) => s.parse(),
            Value::Object(map) => {
                let secs = map.get("seconds").map_or(Some(0), Value::as_i64);
                let nanos = map.get("nanos").map_or(Some(0), Value::as_i64);
                match (secs, nanos) {
                    (Some(secs), Some(nanos)) if secs >= 0 && (0..i64::from(NANOS_PER_SEC)).contains(&nanos) => {
                        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                        let duration = Duration::new(secs as u64, nanos as u32);
                        Ok(Self(duration))
                    }
                    _ => Err(GenAiError::validation("ttl", "`seconds` and `nanos` must be non-negative integers")),
                }
            }
            other => Err(GenAiError::validation("ttl", format!("unsupported value: {other}"))),
        }
    }
}

impl Default for Ttl {
    fn default() -> Self {
        DEFAULT_TTL
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self::from_secs(secs)
    }
}

impl TryFrom<chrono::Duration> for Ttl {
    type Error = GenAiError;

    fn try_from(duration: chrono::Duration) -> Result<Self, Self::Error> {
        duration
            .to_std()
            .map(Self)
            .map_err(|_| GenAiError::validation("ttl", format!("must be non-negative, got {duration}")))
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl FromStr for Ttl {
    type Err = GenAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GenAiError::validation("ttl", format!("invalid duration string `{s}`, expected e.g. \"3600s\""));

        let body = s.trim().strip_suffix('s').ok_or_else(invalid)?;
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));

        let secs: u64 = whole.parse().map_err(|_| invalid())?;
        if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let nanos = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<9}").parse::<u32>().map_err(|_| invalid())?
        };

        Ok(Self(Duration::new(secs, nanos)))
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_proto_string())
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_proto_string())
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(de::Error::custom)
    }
}

/// Absolute UTC instant at which a cached content resource expires.
///
/// Serialized as RFC 3339, e.g. `"2024-06-01T12:00:00Z"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpireTime(DateTime<Utc>);

impl ExpireTime {
    /// The wrapped instant.
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339 with a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Accepts an RFC 3339 string or a `{"seconds": n, "nanos": m}` timestamp.
    pub fn from_json(value: &Value) -> GenAiResult<Self> {
        match value {
            Value::String(s) => s.parse(),
            Value::Object(map) => {
                let secs = map.get("seconds").map_or(Some(0), Value::as_i64);
                let nanos = map
                    .get("nanos")
                    .map_or(Some(0), Value::as_u64)
                    .and_then(|n| u32::try_from(n).ok());
                secs.zip(nanos)
                    .and_then(|(secs, nanos)| DateTime::from_timestamp(secs, nanos))
                    .map(Self)
                    .ok_or_else(|| GenAiError::validation("expire_time", "invalid `seconds`/`nanos` timestamp"))
            }
            other => Err(GenAiError::validation("expire_time", format!("unsupported value: {other}"))),
        }
    }
}

impl From<DateTime<Utc>> for ExpireTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl From<SystemTime> for ExpireTime {
    fn from(instant: SystemTime) -> Self {
        Self(DateTime::<Utc>::from(instant))
    }
}

impl From<ExpireTime> for DateTime<Utc> {
    fn from(expire_time: ExpireTime) -> Self {
        expire_time.0
    }
}

impl FromStr for ExpireTime {
    type Err = GenAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|t| Self(t.with_timezone(&Utc)))
            .map_err(|e| GenAiError::validation("expire_time", format!("invalid RFC 3339 timestamp `{s}`: {e}")))
    }
}

impl fmt::Display for ExpireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for ExpireTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for ExpireTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(de::Error::custom)
    }
}
