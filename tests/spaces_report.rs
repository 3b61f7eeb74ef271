use std::panic::{self, AssertUnwindSafe};

use chrono::{TimeZone, Utc};
use cinnabot::firestore::{ConnectionBuilder, HttpDatastore};
use cinnabot::spaces::spaces_message;
use httpmock::prelude::*;
use serde_json::json;

fn try_start_server() -> Option<MockServer> {
    panic::catch_unwind(AssertUnwindSafe(MockServer::start)).ok()
}

#[test]
fn tomorrow_lists_bookings_from_firestore() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping tomorrow_lists_bookings_from_firestore: unable to bind httpmock server.");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta1/projects/usc-website-206715/databases/(default)/documents:runQuery")
            .body(r#"{"structuredQuery":{"from":[{"collectionId":"events","allDescendants":false}],"where":{"fieldFilter":{"field":{"fieldPath":"endDate"},"op":"GREATER_THAN","value":{"timestampValue":"2019-01-15T16:00:00Z"}}}}}"#);
        then.status(200).json_body(json!([
            {
                "document": {
                    "name": "projects/usc-website-206715/databases/(default)/documents/events/FEHpJv0xavSNCEhqE7MS",
                    "fields": {
                        "name": { "stringValue": "Mass Check-In" },
                        "venueName": { "stringValue": "Chatterbox" },
                        "fullDay": { "booleanValue": true },
                        "venue": { "stringValue": "V4TTAgG9fe4bjSm4Vl3M" },
                        "endDate": { "timestampValue": "2019-01-16T15:30:00Z" },
                        "startDate": { "timestampValue": "2019-01-15T16:00:00Z" }
                    },
                    "createTime": "2018-11-08T09:54:34.250175Z",
                    "updateTime": "2018-11-08T09:54:34.250175Z"
                },
                "readTime": "2018-12-19T08:47:02.232588Z"
            }
        ]));
    });

    let datastore = HttpDatastore::builder()
        .with_connection_builder(ConnectionBuilder::new().with_host(server.base_url()))
        .build()
        .expect("datastore");
    let now = Utc.with_ymd_and_hms(2019, 1, 15, 3, 0, 0).unwrap();
    let message = spaces_message(&datastore, &["tomorrow"], now);

    mock.assert();
    assert_eq!(
        message,
        "Displaying all bookings on Wed 16 Jan 19:\n\n\
         =======================\nChatterbox\n=======================\n\
         *Mass Check-In:* 12AM to 11:30PM, Wed 16 Jan 19\n\n"
    );
}
