use serde::Deserialize;

use crate::firestore::api::document::RawDocument;
use crate::firestore::error::{malformed_response, remote_error, FirestoreResult};

use super::rpc_error::extract_remote_error;

#[derive(Debug, Deserialize)]
struct QueryResponseEntry {
    #[serde(default)]
    document: RawDocument,
}

/// Decodes a `runQuery` response body into raw documents.
///
/// * `[]` means no results.
/// * A single entry without a document name is either an error envelope
///   (returned as a `Remote` error) or the server's "ran, matched nothing"
///   marker (returned as no results).
/// * Anything else is returned as-is, even if some later entry lacks a name.
pub fn parse_response(body: &[u8]) -> FirestoreResult<Vec<RawDocument>> {
    let entries: Vec<QueryResponseEntry> = serde_json::from_slice(body)
        .map_err(|err| malformed_response(format!("Invalid runQuery response: {err}")))?;

    let mut documents: Vec<RawDocument> = entries.into_iter().map(|entry| entry.document).collect();

    // every stored document has a name, so a nameless single entry is a marker
    if documents.len() == 1 && documents[0].name().is_empty() {
        documents.clear();
        if let Some(detail) = extract_remote_error(body) {
            log::warn!("Firestore runQuery returned an error: {detail:?}");
            return Err(remote_error(detail));
        }
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::error::FirestoreErrorCode;

    #[test]
    fn empty_array_is_no_results() {
        assert!(parse_response(b"[]").unwrap().is_empty());
    }

    #[test]
    fn read_time_only_is_no_results() {
        let body = br#"[{"readTime":"2019-12-23T04:31:05.621387Z"}]"#;
        assert!(parse_response(body).unwrap().is_empty());
    }

    #[test]
    fn error_envelope_is_remote_error() {
        let body = br#"[{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}]"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::Remote);
        let detail = err.remote_detail().unwrap();
        assert_eq!(detail.code, 403);
        assert_eq!(detail.status, "PERMISSION_DENIED");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_response(b"<html>oops</html>").unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::MalformedResponse);
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_response(br#"{"error":{"code":404}}"#).unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::MalformedResponse);
    }

    #[test]
    fn returns_named_documents() {
        let body = br#"[
            {"document": {"name": "projects/p/databases/(default)/documents/c/a", "fields": {"n": {"integerValue": "1"}}}, "readTime": "2019-12-19T08:47:02.232588Z"},
            {"document": {"name": "projects/p/databases/(default)/documents/c/b"}, "readTime": "2019-12-19T08:47:02.232588Z"}
        ]"#;
        let documents = parse_response(body).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].name(), "projects/p/databases/(default)/documents/c/a");
        assert!(documents[1].data().is_null());
    }

    #[test]
    fn nameless_entry_among_many_is_kept() {
        let body = br#"[
            {"document": {"name": "projects/p/databases/(default)/documents/c/a"}},
            {"readTime": "2019-12-19T08:47:02.232588Z"}
        ]"#;
        let documents = parse_response(body).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].name(), "");
    }
}
