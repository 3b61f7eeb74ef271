use serde::Deserialize;

/// Error detail carried by a `runQuery` error envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteErrorDetail {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<RemoteErrorDetail>,
}

/// Reads `body` as `[{"error": {...}}, ...]` and returns the first non-empty detail.
pub(crate) fn extract_remote_error(body: &[u8]) -> Option<RemoteErrorDetail> {
    serde_json::from_slice::<Vec<ErrorEnvelope>>(body)
        .ok()
        .and_then(|envelopes| envelopes.into_iter().next())
        .and_then(|envelope| envelope.error)
        .filter(|detail| *detail != RemoteErrorDetail::default())
}
