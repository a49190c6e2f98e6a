//! Response envelope
//!
//! Every reply is an `Envelope<T>`. The status is 200 on success and 500 on
//! any failure; `error` carries the failure text verbatim and `kind` its
//! classification.

use lingua_common::{ErrorKind, LinguaError, Wire};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub error: String,
    pub kind: Option<ErrorKind>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful reply carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            error: String::new(),
            kind: None,
            data: Some(data),
        }
    }

    /// Failed reply carrying the error text and kind
    pub fn failure(err: &LinguaError) -> Self {
        Self {
            status: STATUS_ERROR,
            error: err.to_string(),
            kind: Some(err.kind()),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            status: STATUS_OK,
            error: String::new(),
            kind: None,
            data: None,
        }
    }
}

impl<T: Wire> Wire for Envelope<T> {
    fn wire_name() -> Cow<'static, str> {
        Cow::Owned(format!("Envelope<{}>", T::wire_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_common::Transcoder;

    #[test]
    fn test_ok_envelope() {
        let envelope = Envelope::ok("hello".to_string());
        assert!(envelope.is_ok());
        assert_eq!(envelope.status, 200);
        assert!(envelope.error.is_empty());
        assert_eq!(envelope.kind, None);
        assert_eq!(envelope.data.as_deref(), Some("hello"));
    }

    #[test]
    fn test_failure_envelope() {
        let err = LinguaError::NotFound("language not found: L1".to_string());
        let envelope: Envelope<()> = Envelope::failure(&err);

        assert!(!envelope.is_ok());
        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.error, "language not found: L1");
        assert_eq!(envelope.kind, Some(ErrorKind::NotFound));
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_wire_name_includes_payload_type() {
        assert_eq!(Envelope::<()>::wire_name(), "Envelope<()>");
        assert_eq!(Envelope::<Vec<String>>::wire_name(), "Envelope<[]string>");
    }

    #[test]
    fn test_envelope_crosses_transcoder() {
        let envelope = Envelope::ok(vec!["a".to_string(), "b".to_string()]);

        let mut transcoder = Transcoder::new();
        transcoder.encode(&envelope).unwrap();
        let decoded: Envelope<Vec<String>> = transcoder.decode().unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_envelope_payload_type_is_checked() {
        let mut transcoder = Transcoder::new();
        transcoder.encode(&Envelope::ok(())).unwrap();
        assert!(transcoder.decode::<Envelope<String>>().is_err());
    }
}
