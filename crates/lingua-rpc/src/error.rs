//! RPC-specific error types

use lingua_common::{CodecError, LinguaError};
use thiserror::Error;

/// Errors raised by transports and the dispatcher
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out on {0}")]
    Timeout(String),

    #[error("No responders on {0}")]
    NoResponders(String),

    #[error("Not connected")]
    NotConnected,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<RpcError> for LinguaError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Timeout(channel) => LinguaError::Timeout(channel),
            RpcError::Codec(e) => e.into(),
            RpcError::Configuration(s) => LinguaError::Internal(s),
            RpcError::Connection(s) | RpcError::Transport(s) => LinguaError::Transport(s),
            RpcError::NoResponders(_) | RpcError::NotConnected => {
                LinguaError::Transport(err.to_string())
            }
        }
    }
}
