use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::firestore::error::{parse_error, FirestoreError, FirestoreResult};

/// A document as returned by `runQuery`, with its fields left uninterpreted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "fields")]
    data: JsonValue,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, data: JsonValue) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Full resource name, `projects/{p}/databases/{d}/documents/{path}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw `fields` object, or `null` when the document has no fields.
    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    /// The last path segment of the document name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Interprets the fields with `parse`.
    ///
    /// A document is returned even when `parse` fails; it then holds
    /// `T::default()` and the failure is available through
    /// [`Document::parse_error`].
    pub fn parse_data<T, F>(&self, parse: F) -> Document<T>
    where
        T: Default,
        F: FnOnce(&JsonValue) -> FirestoreResult<T>,
    {
        match parse(&self.data) {
            Ok(data) => Document {
                name: self.name.clone(),
                data,
                parse_error: None,
            },
            Err(err) => {
                log::warn!("Failed to parse Firestore document '{}': {err}", self.name);
                Document {
                    name: self.name.clone(),
                    data: T::default(),
                    parse_error: Some(err),
                }
            }
        }
    }
}

/// A document whose fields were decoded into `T`.
#[derive(Clone, Debug)]
pub struct Document<T> {
    name: String,
    data: T,
    parse_error: Option<FirestoreError>,
}

impl<T> Document<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// The error returned by the parse function, if it failed for this document.
    pub fn parse_error(&self) -> Option<&FirestoreError> {
        self.parse_error.as_ref()
    }

    pub fn is_parsed(&self) -> bool {
        self.parse_error.is_none()
    }
}

/// Standard parse function: deserializes the `fields` object with serde.
///
/// Field types are usually the typed scalar wrappers, e.g.
/// [`StringValue`](crate::firestore::value::StringValue).
pub fn decode_fields<T>(fields: &JsonValue) -> FirestoreResult<T>
where
    T: DeserializeOwned,
{
    T::deserialize(fields).map_err(|err| parse_error(format!("Failed to decode document fields: {err}")))
}

/// Applies `parse` to every document independently.
///
/// Documents whose parse failed are kept only when `include_failed` is set.
pub fn decode_all<T, F>(raw: Vec<RawDocument>, parse: F, include_failed: bool) -> Vec<Document<T>>
where
    T: Default,
    F: Fn(&JsonValue) -> FirestoreResult<T>,
{
    let mut documents = Vec::with_capacity(raw.len());
    for document in &raw {
        let parsed = document.parse_data(&parse);
        if include_failed || parsed.is_parsed() {
            documents.push(parsed);
        }
    }
    documents
}
