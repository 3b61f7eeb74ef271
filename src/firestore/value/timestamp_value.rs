use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use serde_json::Value as JsonValue;

use crate::firestore::constants::TIMESTAMP_WIRE_FORMAT;
use crate::firestore::error::{malformed_scalar, FirestoreResult};
use crate::util::time::{sg_offset, to_sg};

use super::wire::{impl_wire_serde, WireScalar};

/// A Firestore timestamp, `{"timestampValue": "2019-12-20T15:00:00Z"}` on the wire.
///
/// Only whole-second UTC timestamps are accepted. Decoded instants are held in
/// UTC+8 so display code can render them directly; comparisons are on the
/// absolute instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampValue(DateTime<FixedOffset>);

impl TimestampValue {
    pub fn new<Tz: TimeZone>(instant: DateTime<Tz>) -> Self {
        Self(to_sg(&instant))
    }

    pub fn value(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

impl Default for TimestampValue {
    fn default() -> Self {
        Self(DateTime::<Utc>::default().with_timezone(&sg_offset()))
    }
}

impl WireScalar for TimestampValue {
    const WIRE_KEY: &'static str = "timestampValue";

    fn encode_payload(&self) -> JsonValue {
        JsonValue::String(self.utc().format(TIMESTAMP_WIRE_FORMAT).to_string())
    }

    fn decode_payload(payload: &JsonValue) -> FirestoreResult<Self> {
        let text = payload
            .as_str()
            .ok_or_else(|| malformed_scalar(format!("timestampValue must be a string, got {payload}")))?;
        if !has_wire_shape(text) {
            return Err(malformed_scalar(format!(
                "Invalid timestampValue '{text}': expected YYYY-MM-DDTHH:MM:SSZ"
            )));
        }
        let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_WIRE_FORMAT)
            .map_err(|err| malformed_scalar(format!("Invalid timestampValue '{text}': {err}")))?;
        // chrono reports second 60 as 59 plus a leap nanosecond
        if naive.nanosecond() >= 1_000_000_000 {
            return Err(malformed_scalar(format!("Invalid timestampValue '{text}': leap second")));
        }
        Ok(Self::new(Utc.from_utc_datetime(&naive)))
    }
}

impl_wire_serde!(TimestampValue);

/// `YYYY-MM-DDTHH:MM:SSZ`, every field zero-padded.
fn has_wire_shape(text: &str) -> bool {
    const SHAPE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";
    let bytes = text.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(&byte, &expected)| match expected {
            b'd' => byte.is_ascii_digit(),
            _ => byte == expected,
        })
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimestampValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::new(value)
    }
}

impl Display for TimestampValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
