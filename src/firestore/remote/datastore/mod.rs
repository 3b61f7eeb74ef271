use serde_json::Value as JsonValue;

use crate::firestore::api::document::{decode_all, Document, RawDocument};
use crate::firestore::api::query::Query;
use crate::firestore::error::FirestoreResult;

pub mod http;
pub mod in_memory;

/// Executes structured queries against one backend.
pub trait Datastore: Send + Sync {
    /// Runs `query` against the `(default)` database of `project_id`.
    fn run_query(&self, project_id: &str, query: &Query) -> FirestoreResult<Vec<RawDocument>>;

    /// Runs `query` and decodes every returned document with `parse`.
    ///
    /// A document failing to parse never fails the call; it is dropped, or
    /// returned with its parse error when `include_failed` is set.
    fn run_query_and_parse<T, F>(
        &self,
        project_id: &str,
        query: &Query,
        parse: F,
        include_failed: bool,
    ) -> FirestoreResult<Vec<Document<T>>>
    where
        Self: Sized,
        T: Default,
        F: Fn(&JsonValue) -> FirestoreResult<T>,
    {
        let raw = self.run_query(project_id, query)?;
        Ok(decode_all(raw, parse, include_failed))
    }
}

pub use http::{HttpDatastore, HttpDatastoreBuilder};
pub use in_memory::InMemoryDatastore;
