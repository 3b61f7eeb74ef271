use crate::firestore::api::document::RawDocument;
use crate::firestore::api::query::Query;
use crate::firestore::error::FirestoreResult;
use crate::firestore::model::DatabaseId;
use crate::firestore::remote::connection::{Connection, ConnectionBuilder};
use crate::firestore::remote::response::parse_response;

use super::Datastore;

/// Runs queries over the Firestore REST API.
#[derive(Clone, Debug)]
pub struct HttpDatastore {
    connection: Connection,
}

#[derive(Clone, Debug, Default)]
pub struct HttpDatastoreBuilder {
    connection_builder: ConnectionBuilder,
}

impl HttpDatastore {
    pub fn builder() -> HttpDatastoreBuilder {
        HttpDatastoreBuilder::new()
    }

    /// A datastore against the production host, or the emulator when
    /// `FIRESTORE_EMULATOR_HOST` is set.
    pub fn from_env() -> FirestoreResult<Self> {
        Self::builder().build()
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Sends the `runQuery` request and returns the undecoded response body.
    pub fn send_request(&self, project_id: &str, query: &Query) -> FirestoreResult<Vec<u8>> {
        let body = query.to_json()?;
        let path = DatabaseId::default(project_id).run_query_path();
        log::debug!("Running Firestore query against {path}: {body}");
        self.connection.post_json(&path, body)
    }
}

impl HttpDatastoreBuilder {
    pub fn new() -> Self {
        Self {
            connection_builder: ConnectionBuilder::new(),
        }
    }

    pub fn with_connection_builder(mut self, builder: ConnectionBuilder) -> Self {
        self.connection_builder = builder;
        self
    }

    pub fn build(self) -> FirestoreResult<HttpDatastore> {
        let connection = self.connection_builder.build()?;
        Ok(HttpDatastore { connection })
    }
}

impl Datastore for HttpDatastore {
    fn run_query(&self, project_id: &str, query: &Query) -> FirestoreResult<Vec<RawDocument>> {
        let body = self.send_request(project_id, query)?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::api::document::decode_fields;
    use crate::firestore::api::query::FilterOperator;
    use crate::firestore::error::FirestoreErrorCode;
    use crate::firestore::value::StringValue;
    use crate::test_support::start_mock_server;
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct City {
        #[serde(default)]
        name: StringValue,
    }

    fn datastore_for(server: &MockServer) -> HttpDatastore {
        HttpDatastore::builder()
            .with_connection_builder(ConnectionBuilder::new().with_host(server.base_url()))
            .build()
            .unwrap()
    }

    #[test]
    fn run_query_posts_structured_query() {
        let Some(server) = start_mock_server() else {
            eprintln!("Skipping run_query_posts_structured_query: unable to bind httpmock server.");
            return;
        };
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta1/projects/demo-project/databases/(default)/documents:runQuery")
                .header("content-type", "application/json")
                .body(
                    r#"{"structuredQuery":{"from":[{"collectionId":"cities","allDescendants":false}],"where":{"fieldFilter":{"field":{"fieldPath":"name"},"op":"EQUAL","value":{"stringValue":"Los Angeles"}}}}}"#,
                );
            then.status(200).json_body(json!([
                {
                    "document": {
                        "name": "projects/demo-project/databases/(default)/documents/cities/LA",
                        "fields": { "name": { "stringValue": "Los Angeles" } }
                    },
                    "readTime": "2019-12-19T08:47:02.232588Z"
                }
            ]));
        });

        let datastore = datastore_for(&server);
        let query = Query::from_collection("cities").filter("name", FilterOperator::Equal, "Los Angeles");
        let cities = datastore
            .run_query_and_parse("demo-project", &query, decode_fields::<City>, false)
            .unwrap();

        mock.assert();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].data().name.value(), "Los Angeles");
        assert!(cities[0].name().ends_with("/cities/LA"));
    }

    #[test]
    fn error_envelope_becomes_remote_error() {
        let Some(server) = start_mock_server() else {
            eprintln!("Skipping error_envelope_becomes_remote_error: unable to bind httpmock server.");
            return;
        };
        server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta1/projects/demo-project/databases/(default)/documents:runQuery");
            then.status(400).json_body(json!([
                { "error": { "code": 400, "message": "no matching index", "status": "FAILED_PRECONDITION" } }
            ]));
        });

        let datastore = datastore_for(&server);
        let err = datastore
            .run_query("demo-project", &Query::from_collection("cities"))
            .unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::Remote);
        assert_eq!(err.remote_detail().unwrap().status, "FAILED_PRECONDITION");
    }

    #[test]
    fn send_request_returns_raw_body() {
        let Some(server) = start_mock_server() else {
            eprintln!("Skipping send_request_returns_raw_body: unable to bind httpmock server.");
            return;
        };
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200).body("[]");
        });

        let datastore = datastore_for(&server);
        let body = datastore
            .send_request("demo-project", &Query::from_collection("cities"))
            .unwrap();

        assert_eq!(body, b"[]");
        mock.assert_hits(1);
    }
}
