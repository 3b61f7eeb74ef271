use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::Value as JsonValue;

use crate::firestore::api::document::RawDocument;
use crate::firestore::api::query::{Filter, FilterOperator, Query};
use crate::firestore::error::{internal_error, FirestoreResult};
use crate::firestore::remote::response::parse_response;
use crate::firestore::value::ScalarValue;

use super::Datastore;

type CollectionKey = (String, String);

/// A datastore serving documents held in memory, for tests and offline demos.
///
/// Documents are stored per `(project, collection)`. Queries are evaluated
/// locally: every filter must match, and a document missing a filtered field
/// never matches. Each query's encoded body is recorded.
#[derive(Clone, Default)]
pub struct InMemoryDatastore {
    collections: Arc<Mutex<BTreeMap<CollectionKey, Vec<RawDocument>>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document with the given `fields` object under `collection_id/document_id`.
    pub fn insert(&self, project_id: &str, collection_id: &str, document_id: &str, fields: JsonValue) {
        let name = format!("projects/{project_id}/databases/(default)/documents/{collection_id}/{document_id}");
        self.lock_collections()
            .entry((project_id.to_string(), collection_id.to_string()))
            .or_default()
            .push(RawDocument::new(name, fields));
    }

    /// Replaces a collection's contents with the documents of a raw `runQuery`
    /// response body.
    pub fn load_response(&self, project_id: &str, collection_id: &str, body: &[u8]) -> FirestoreResult<()> {
        let documents = parse_response(body)?;
        self.lock_collections()
            .insert((project_id.to_string(), collection_id.to_string()), documents);
        Ok(())
    }

    /// Encoded bodies of every query run so far, oldest first.
    pub fn sent_queries(&self) -> Vec<String> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    fn lock_collections(&self) -> std::sync::MutexGuard<'_, BTreeMap<CollectionKey, Vec<RawDocument>>> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Datastore for InMemoryDatastore {
    fn run_query(&self, project_id: &str, query: &Query) -> FirestoreResult<Vec<RawDocument>> {
        let body = query.to_json()?;
        self.sent
            .lock()
            .map_err(|_| internal_error("In-memory datastore lock poisoned"))?
            .push(body);

        let collections = self.lock_collections();
        let mut results = Vec::new();
        for selector in query.selectors() {
            let key = (project_id.to_string(), selector.collection_id().to_string());
            let Some(documents) = collections.get(&key) else {
                continue;
            };
            results.extend(
                documents
                    .iter()
                    .filter(|document| document_matches(document, query.filters().as_slice()))
                    .cloned(),
            );
        }
        Ok(results)
    }
}

fn document_matches(document: &RawDocument, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        document
            .data()
            .get(filter.field())
            .and_then(|value| ScalarValue::from_wire(value).ok())
            .and_then(|value| compare_scalars(&value, filter.value()))
            .map(|ordering| operator_accepts(filter.operator(), ordering))
            .unwrap_or(false)
    })
}

fn compare_scalars(left: &ScalarValue, right: &ScalarValue) -> Option<Ordering> {
    match (left, right) {
        (ScalarValue::String(a), ScalarValue::String(b)) => Some(a.value().cmp(b.value())),
        (ScalarValue::Integer(a), ScalarValue::Integer(b)) => Some(a.value().cmp(&b.value())),
        (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => Some(a.value().cmp(&b.value())),
        (ScalarValue::Timestamp(a), ScalarValue::Timestamp(b)) => Some(a.utc().cmp(&b.utc())),
        _ => None,
    }
}

fn operator_accepts(operator: FilterOperator, ordering: Ordering) -> bool {
    match operator {
        FilterOperator::LessThan => ordering == Ordering::Less,
        FilterOperator::LessThanOrEqual => ordering != Ordering::Greater,
        FilterOperator::GreaterThan => ordering == Ordering::Greater,
        FilterOperator::GreaterThanOrEqual => ordering != Ordering::Less,
        FilterOperator::Equal => ordering == Ordering::Equal,
    }
}
