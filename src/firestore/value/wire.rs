use serde_json::Value as JsonValue;

use crate::firestore::error::{malformed_scalar, FirestoreResult};

/// A scalar with a fixed typed-value envelope on the wire, e.g.
/// `{"stringValue": "abc"}`.
///
/// Implementors only describe the payload under their key; the envelope itself
/// and the serde integration are shared.
pub trait WireScalar: Sized {
    /// The type tag key used by the REST API (`stringValue`, `integerValue`, ...).
    const WIRE_KEY: &'static str;

    /// Encodes the native value into the JSON payload stored under [`Self::WIRE_KEY`].
    fn encode_payload(&self) -> JsonValue;

    /// Decodes the JSON payload found under [`Self::WIRE_KEY`].
    fn decode_payload(payload: &JsonValue) -> FirestoreResult<Self>;

    /// Encodes the full `{WIRE_KEY: payload}` envelope.
    fn to_wire(&self) -> JsonValue {
        let mut envelope = serde_json::Map::with_capacity(1);
        envelope.insert(Self::WIRE_KEY.to_string(), self.encode_payload());
        JsonValue::Object(envelope)
    }

    /// Decodes a full envelope, rejecting objects that lack the expected key.
    fn from_wire(value: &JsonValue) -> FirestoreResult<Self> {
        let payload = envelope_payload(value, Self::WIRE_KEY)?;
        Self::decode_payload(payload)
    }
}

pub(crate) fn envelope_payload<'a>(value: &'a JsonValue, key: &str) -> FirestoreResult<&'a JsonValue> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed_scalar(format!("Expected an object carrying '{key}', got {value}")))?;
    object
        .get(key)
        .ok_or_else(|| malformed_scalar(format!("Missing '{key}' in typed value {value}")))
}

/// Implements `Serialize`/`Deserialize` for a [`WireScalar`] through its envelope.
macro_rules! impl_wire_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    use serde::ser::SerializeMap;
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry(
                        <$ty as $crate::firestore::value::WireScalar>::WIRE_KEY,
                        &$crate::firestore::value::WireScalar::encode_payload(self),
                    )?;
                    map.end()
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as $crate::firestore::value::WireScalar>::from_wire(&value)
                        .map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use impl_wire_serde;
