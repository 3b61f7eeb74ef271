use serde_json::Value as JsonValue;

use crate::firestore::error::{malformed_scalar, FirestoreResult};

use super::wire::{impl_wire_serde, WireScalar};

/// A Firestore integer, `{"integerValue": "1"}` on the wire.
///
/// The payload is a decimal string, never a JSON number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntegerValue(i64);

impl IntegerValue {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl WireScalar for IntegerValue {
    const WIRE_KEY: &'static str = "integerValue";

    fn encode_payload(&self) -> JsonValue {
        JsonValue::String(self.0.to_string())
    }

    fn decode_payload(payload: &JsonValue) -> FirestoreResult<Self> {
        let digits = payload
            .as_str()
            .ok_or_else(|| malformed_scalar(format!("integerValue must be a string, got {payload}")))?;
        digits
            .parse::<i64>()
            .map(Self)
            .map_err(|err| malformed_scalar(format!("Invalid integerValue '{digits}': {err}")))
    }
}

impl_wire_serde!(IntegerValue);

impl From<i64> for IntegerValue {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for IntegerValue {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}
