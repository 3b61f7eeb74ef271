use chrono::{DateTime, TimeZone};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::firestore::error::{malformed_scalar, FirestoreResult};

use super::{BooleanValue, IntegerValue, StringValue, TimestampValue, WireScalar};

/// The closed set of typed values a filter can compare against.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    String(StringValue),
    Integer(IntegerValue),
    Boolean(BooleanValue),
    Timestamp(TimestampValue),
}

impl ScalarValue {
    /// Encodes the value as its typed-value envelope.
    pub fn to_wire(&self) -> JsonValue {
        match self {
            ScalarValue::String(value) => value.to_wire(),
            ScalarValue::Integer(value) => value.to_wire(),
            ScalarValue::Boolean(value) => value.to_wire(),
            ScalarValue::Timestamp(value) => value.to_wire(),
        }
    }

    /// Decodes any supported envelope, dispatching on its type tag key.
    pub fn from_wire(value: &JsonValue) -> FirestoreResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| malformed_scalar(format!("Expected a typed value object, got {value}")))?;
        if object.contains_key(StringValue::WIRE_KEY) {
            return StringValue::from_wire(value).map(ScalarValue::String);
        }
        if object.contains_key(IntegerValue::WIRE_KEY) {
            return IntegerValue::from_wire(value).map(ScalarValue::Integer);
        }
        if object.contains_key(BooleanValue::WIRE_KEY) {
            return BooleanValue::from_wire(value).map(ScalarValue::Boolean);
        }
        if object.contains_key(TimestampValue::WIRE_KEY) {
            return TimestampValue::from_wire(value).map(ScalarValue::Timestamp);
        }
        Err(malformed_scalar(format!("Unsupported typed value {value}")))
    }

    pub fn wire_key(&self) -> &'static str {
        match self {
            ScalarValue::String(_) => StringValue::WIRE_KEY,
            ScalarValue::Integer(_) => IntegerValue::WIRE_KEY,
            ScalarValue::Boolean(_) => BooleanValue::WIRE_KEY,
            ScalarValue::Timestamp(_) => TimestampValue::WIRE_KEY,
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::String(value) => value.serialize(serializer),
            ScalarValue::Integer(value) => value.serialize(serializer),
            ScalarValue::Boolean(value) => value.serialize(serializer),
            ScalarValue::Timestamp(value) => value.serialize(serializer),
        }
    }
}

impl From<StringValue> for ScalarValue {
    fn from(value: StringValue) -> Self {
        ScalarValue::String(value)
    }
}

impl From<IntegerValue> for ScalarValue {
    fn from(value: IntegerValue) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<BooleanValue> for ScalarValue {
    fn from(value: BooleanValue) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<TimestampValue> for ScalarValue {
    fn from(value: TimestampValue) -> Self {
        ScalarValue::Timestamp(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(StringValue::from(value))
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::String(StringValue::from(value))
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(IntegerValue::new(value))
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(BooleanValue::new(value))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ScalarValue {
    fn from(value: DateTime<Tz>) -> Self {
        ScalarValue::Timestamp(TimestampValue::new(value))
    }
}
