//! Error types for lingua

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias for lingua operations
pub type Result<T> = std::result::Result<T, LinguaError>;

/// Machine-readable error classification carried in response envelopes.
///
/// The wire status stays a generic failure code; the kind lets callers branch
/// without matching on error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    DuplicateValue,
    Encoding,
    Decoding,
    EmptyBuffer,
    Transport,
    Timeout,
    Internal,
}

impl ErrorKind {
    /// Stable lowercase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::DuplicateValue => "duplicate_value",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Decoding => "decoding",
            ErrorKind::EmptyBuffer => "empty_buffer",
            ErrorKind::Transport => "transport",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }

    /// Returns true if the request collided with existing state
    pub fn is_conflict(&self) -> bool {
        matches!(self, ErrorKind::AlreadyExists | ErrorKind::DuplicateValue)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for all lingua operations
///
/// Store failures keep their original message untouched so that callers
/// matching on the reply text see exactly what the store reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinguaError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    DuplicateValue(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Decoding error: buffer is empty")]
    EmptyBuffer,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinguaError {
    /// Classify this error for the response envelope
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinguaError::NotFound(_) => ErrorKind::NotFound,
            LinguaError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            LinguaError::DuplicateValue(_) => ErrorKind::DuplicateValue,
            LinguaError::Encoding(_) => ErrorKind::Encoding,
            LinguaError::Decoding(_) => ErrorKind::Decoding,
            LinguaError::EmptyBuffer => ErrorKind::EmptyBuffer,
            LinguaError::Transport(_) => ErrorKind::Transport,
            LinguaError::Timeout(_) => ErrorKind::Timeout,
            LinguaError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<CodecError> for LinguaError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encoding(msg) => LinguaError::Encoding(msg),
            CodecError::Decoding(msg) => LinguaError::Decoding(msg),
            CodecError::EmptyBuffer => LinguaError::EmptyBuffer,
            CodecError::TypeMismatch { .. } | CodecError::UnexpectedEof => {
                LinguaError::Decoding(err.to_string())
            }
        }
    }
}
