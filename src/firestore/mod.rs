//! Minimal client for the Firestore REST `runQuery` endpoint.
//!
//! Queries are built with [`Query`], executed by a [`Datastore`] and their
//! documents decoded independently of each other with a caller-supplied parse
//! function, usually [`decode_fields`].

use serde_json::Value as JsonValue;

pub mod api;
mod constants;
pub mod error;
pub mod model;
pub mod remote;
pub mod value;

pub use api::{
    decode_all, decode_fields, CollectionSelector, Document, Filter, FilterOperator, Filters, Query, RawDocument,
};
pub use constants::DEFAULT_DATABASE_ID;
pub use error::{FirestoreError, FirestoreErrorCode, FirestoreResult};
pub use model::DatabaseId;
pub use remote::{Connection, ConnectionBuilder, Datastore, HttpDatastore, InMemoryDatastore, RemoteErrorDetail};
pub use value::{BooleanValue, IntegerValue, ScalarValue, StringValue, TimestampValue, WireScalar};

/// Runs `query` against the `(default)` database of `project_id` with a
/// datastore configured from the environment.
pub fn run_query(project_id: &str, query: &Query) -> FirestoreResult<Vec<RawDocument>> {
    HttpDatastore::from_env()?.run_query(project_id, query)
}

/// Like [`run_query`], decoding each document with `parse`.
pub fn run_query_and_parse<T, F>(
    project_id: &str,
    query: &Query,
    parse: F,
    include_failed: bool,
) -> FirestoreResult<Vec<Document<T>>>
where
    T: Default,
    F: Fn(&JsonValue) -> FirestoreResult<T>,
{
    HttpDatastore::from_env()?.run_query_and_parse(project_id, query, parse, include_failed)
}
