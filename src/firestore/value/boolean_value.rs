use serde_json::Value as JsonValue;

use crate::firestore::error::{malformed_scalar, FirestoreResult};

use super::wire::{impl_wire_serde, WireScalar};

/// A Firestore boolean, `{"booleanValue": true}` on the wire.
///
/// The only scalar whose payload is not stringified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BooleanValue(bool);

impl BooleanValue {
    pub fn new(value: bool) -> Self {
        Self(value)
    }

    pub fn value(&self) -> bool {
        self.0
    }
}

impl WireScalar for BooleanValue {
    const WIRE_KEY: &'static str = "booleanValue";

    fn encode_payload(&self) -> JsonValue {
        JsonValue::Bool(self.0)
    }

    fn decode_payload(payload: &JsonValue) -> FirestoreResult<Self> {
        payload
            .as_bool()
            .map(Self)
            .ok_or_else(|| malformed_scalar(format!("booleanValue must be a bool, got {payload}")))
    }
}

impl_wire_serde!(BooleanValue);

impl From<bool> for BooleanValue {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_and_encodes_canonical_wire() {
        let blob = r#"{"booleanValue":false}"#;
        let value: BooleanValue = serde_json::from_str(blob).unwrap();
        assert!(!value.value());
        assert_eq!(serde_json::to_string(&value).unwrap(), blob);
    }

    #[test]
    fn rejects_stringified_bool() {
        let err = BooleanValue::from_wire(&json!({ "booleanValue": "true" })).unwrap_err();
        assert_eq!(err.code_str(), "firestore/malformed-scalar");
    }
}
