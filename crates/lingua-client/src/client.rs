//! Translation service client

use lingua_common::{subjects, CodecError, ErrorKind, Transcoder, Wire};
use lingua_rpc::{Envelope, RpcError, Transport};
use lingua_store::{Language, TranslationKey, TranslationValue};
use std::sync::Arc;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The service answered with a failure envelope; `message` is its text verbatim
    #[error("{message}")]
    Server {
        kind: Option<ErrorKind>,
        message: String,
    },

    #[error("Successful reply carried no payload")]
    MissingPayload,
}

impl ClientError {
    /// Failure classification reported by the service, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Server { kind, .. } => *kind,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        self.kind().map(|k| k.is_conflict()).unwrap_or(false)
    }
}

/// Typed client for the translation service
pub struct TranslationClient<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> TranslationClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Encode `request`, send it on `subject` and unwrap the reply envelope
    async fn call<Req: Wire, Resp: Wire>(
        &self,
        subject: &str,
        request: Option<&Req>,
    ) -> Result<Resp, ClientError> {
        let payload = match request {
            Some(request) => {
                let mut transcoder = Transcoder::new();
                transcoder.encode(request)?;
                transcoder.into_bytes()
            }
            None => Vec::new(),
        };

        let reply = self.transport.request(subject, payload).await?;
        let envelope: Envelope<Resp> = Transcoder::from_bytes(reply).decode()?;

        if !envelope.is_ok() {
            return Err(ClientError::Server {
                kind: envelope.kind,
                message: envelope.error,
            });
        }
        envelope.data.ok_or(ClientError::MissingPayload)
    }

    // Languages

    pub async fn insert_language(&self, language: &Language) -> Result<(), ClientError> {
        self.call(subjects::LANGUAGE_INSERT, Some(language)).await
    }

    /// Replace the language addressed by `language.uuid`
    pub async fn update_language(&self, language: &Language) -> Result<(), ClientError> {
        self.call(subjects::LANGUAGE_UPDATE, Some(language)).await
    }

    pub async fn delete_language(&self, uuid: &str) -> Result<(), ClientError> {
        let request = Language {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::LANGUAGE_DELETE, Some(&request)).await
    }

    pub async fn get_language(&self, uuid: &str) -> Result<Language, ClientError> {
        let request = Language {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::LANGUAGE_GET, Some(&request)).await
    }

    pub async fn list_languages(&self) -> Result<Vec<Language>, ClientError> {
        self.call::<(), _>(subjects::LANGUAGE_LIST, None).await
    }

    // Keys

    pub async fn insert_key(&self, key: &TranslationKey) -> Result<(), ClientError> {
        self.call(subjects::KEY_INSERT, Some(key)).await
    }

    /// Replace the key addressed by `key.uuid`
    pub async fn update_key(&self, key: &TranslationKey) -> Result<(), ClientError> {
        self.call(subjects::KEY_UPDATE, Some(key)).await
    }

    pub async fn delete_key(&self, uuid: &str) -> Result<(), ClientError> {
        let request = TranslationKey {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::KEY_DELETE, Some(&request)).await
    }

    pub async fn get_key(&self, uuid: &str) -> Result<TranslationKey, ClientError> {
        let request = TranslationKey {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::KEY_GET, Some(&request)).await
    }

    /// Look a key up by its unique value
    pub async fn get_key_by_value(&self, value: &str) -> Result<TranslationKey, ClientError> {
        let request = TranslationKey {
            value: value.to_string(),
            ..Default::default()
        };
        self.call(subjects::KEY_GET_BY_VALUE, Some(&request)).await
    }

    pub async fn list_keys(&self) -> Result<Vec<TranslationKey>, ClientError> {
        self.call::<(), _>(subjects::KEY_LIST, None).await
    }

    // Values

    pub async fn insert_value(&self, value: &TranslationValue) -> Result<(), ClientError> {
        self.call(subjects::VALUE_INSERT, Some(value)).await
    }

    /// Replace the value addressed by `value.uuid`
    pub async fn update_value(&self, value: &TranslationValue) -> Result<(), ClientError> {
        self.call(subjects::VALUE_UPDATE, Some(value)).await
    }

    pub async fn delete_value(&self, uuid: &str) -> Result<(), ClientError> {
        let request = TranslationValue {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::VALUE_DELETE, Some(&request)).await
    }

    pub async fn get_value(&self, uuid: &str) -> Result<TranslationValue, ClientError> {
        let request = TranslationValue {
            uuid: uuid.to_string(),
            ..Default::default()
        };
        self.call(subjects::VALUE_GET, Some(&request)).await
    }

    pub async fn list_values(&self) -> Result<Vec<TranslationValue>, ClientError> {
        self.call::<(), _>(subjects::VALUE_LIST, None).await
    }
}
