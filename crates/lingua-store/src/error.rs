//! Record store error types

use lingua_common::LinguaError;
use thiserror::Error;

/// Errors specific to record store operations
///
/// `label` is the record kind's [`Record::LABEL`](crate::Record::LABEL).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{label} already exists: {uuid}")]
    AlreadyExists { label: &'static str, uuid: String },

    #[error("{label} not found: {uuid}")]
    NotFound { label: &'static str, uuid: String },

    #[error("{label} not found by value: {value}")]
    ValueNotFound { label: &'static str, value: String },

    #[error("{label} value must be unique: {value}")]
    DuplicateValue { label: &'static str, value: String },
}

impl From<StoreError> for LinguaError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::AlreadyExists { .. } => LinguaError::AlreadyExists(message),
            StoreError::NotFound { .. } | StoreError::ValueNotFound { .. } => {
                LinguaError::NotFound(message)
            }
            StoreError::DuplicateValue { .. } => LinguaError::DuplicateValue(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_common::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = StoreError::AlreadyExists {
            label: "language",
            uuid: "L1".to_string(),
        };
        assert_eq!(err.to_string(), "language already exists: L1");

        let err = StoreError::NotFound {
            label: "key",
            uuid: "K9".to_string(),
        };
        assert_eq!(err.to_string(), "key not found: K9");

        let err = StoreError::DuplicateValue {
            label: "key",
            value: "hello".to_string(),
        };
        assert_eq!(err.to_string(), "key value must be unique: hello");
    }

    #[test]
    fn test_into_lingua_error_keeps_text() {
        let err = StoreError::ValueNotFound {
            label: "key",
            value: "missing".to_string(),
        };
        let text = err.to_string();
        let unified: LinguaError = err.into();

        assert_eq!(unified.kind(), ErrorKind::NotFound);
        assert_eq!(unified.to_string(), text);
    }

    #[test]
    fn test_into_lingua_error_kinds() {
        let unified: LinguaError = StoreError::AlreadyExists {
            label: "value",
            uuid: "V1".to_string(),
        }
        .into();
        assert_eq!(unified.kind(), ErrorKind::AlreadyExists);

        let unified: LinguaError = StoreError::DuplicateValue {
            label: "key",
            value: "hello".to_string(),
        }
        .into();
        assert_eq!(unified.kind(), ErrorKind::DuplicateValue);
    }
}
