use serde_json::Value as JsonValue;

use crate::firestore::error::{malformed_scalar, FirestoreResult};

use super::wire::{impl_wire_serde, WireScalar};

/// A Firestore string, `{"stringValue": "abc"}` on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringValue(String);

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl WireScalar for StringValue {
    const WIRE_KEY: &'static str = "stringValue";

    fn encode_payload(&self) -> JsonValue {
        JsonValue::String(self.0.clone())
    }

    fn decode_payload(payload: &JsonValue) -> FirestoreResult<Self> {
        payload
            .as_str()
            .map(Self::new)
            .ok_or_else(|| malformed_scalar(format!("stringValue must be a string, got {payload}")))
    }
}

impl_wire_serde!(StringValue);

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StringValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}
