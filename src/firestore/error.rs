use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::firestore::remote::RemoteErrorDetail;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FirestoreErrorCode {
    InvalidArgument,
    Internal,
    MalformedScalar,
    Serialization,
    Transport,
    Read,
    MalformedResponse,
    Remote,
    Parse,
}

impl FirestoreErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirestoreErrorCode::InvalidArgument => "firestore/invalid-argument",
            FirestoreErrorCode::Internal => "firestore/internal",
            FirestoreErrorCode::MalformedScalar => "firestore/malformed-scalar",
            FirestoreErrorCode::Serialization => "firestore/serialization",
            FirestoreErrorCode::Transport => "firestore/transport",
            FirestoreErrorCode::Read => "firestore/read",
            FirestoreErrorCode::MalformedResponse => "firestore/malformed-response",
            FirestoreErrorCode::Remote => "firestore/remote",
            FirestoreErrorCode::Parse => "firestore/parse",
        }
    }
}

#[derive(Clone, Debug)]
pub struct FirestoreError {
    pub code: FirestoreErrorCode,
    message: String,
    remote: Option<RemoteErrorDetail>,
}

impl FirestoreError {
    pub fn new(code: FirestoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            remote: None,
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error envelope returned by the server, for `Remote` errors.
    pub fn remote_detail(&self) -> Option<&RemoteErrorDetail> {
        self.remote.as_ref()
    }
}

impl Display for FirestoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl Error for FirestoreError {}

pub type FirestoreResult<T> = Result<T, FirestoreError>;

pub fn invalid_argument(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::InvalidArgument, message)
}

pub fn internal_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Internal, message)
}

pub fn malformed_scalar(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::MalformedScalar, message)
}

pub fn serialization_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Serialization, message)
}

pub fn transport_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Transport, message)
}

pub fn read_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Read, message)
}

pub fn malformed_response(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::MalformedResponse, message)
}

pub fn parse_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Parse, message)
}

pub fn remote_error(detail: RemoteErrorDetail) -> FirestoreError {
    let message = format!(
        "Firestore returned error {} {}: {}",
        detail.code, detail.status, detail.message
    );
    FirestoreError {
        code: FirestoreErrorCode::Remote,
        message,
        remote: Some(detail),
    }
}
