//! Transport configuration for runtime selection.
//!
//! # Example
//! ```rust,ignore
//! use lingua_rpc::TransportConfig;
//!
//! // From environment
//! let config = TransportConfig::from_env()?;
//!
//! // Create and connect the transport
//! let transport = config.connect().await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::memory::MemoryTransport;
use super::nats::{NatsTransport, NatsTransportConfig, DEFAULT_REQUEST_TIMEOUT};
use super::{MessageHandler, SubscriptionHandle, Transport};
use crate::RpcError;

/// Unified transport configuration enum.
#[derive(Debug, Clone)]
pub enum TransportConfig {
    /// NATS core pub/sub
    Nats(NatsTransportConfig),

    /// In-process routing
    Memory { request_timeout: Duration },
}

impl TransportConfig {
    /// Create transport configuration from environment variables.
    ///
    /// - `LINGUA_TRANSPORT`: `nats` (default) or `memory`
    /// - `NATS_URL`: defaults to `nats://localhost:4222`
    /// - `LINGUA_REQUEST_TIMEOUT_MS`: defaults to 1000
    pub fn from_env() -> Result<Self, RpcError> {
        Self::from_env_with_overrides(None, None, None)
    }

    /// Like [`from_env`](Self::from_env), but every `Some` argument wins over
    /// its environment variable, which is then not read at all.
    pub fn from_env_with_overrides(
        transport_type: Option<&str>,
        url: Option<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, RpcError> {
        let transport_type = match transport_type {
            Some(transport_type) => transport_type.to_string(),
            None => std::env::var("LINGUA_TRANSPORT").unwrap_or_else(|_| "nats".to_string()),
        };

        let request_timeout = match request_timeout {
            Some(timeout) => timeout,
            None => match std::env::var("LINGUA_REQUEST_TIMEOUT_MS") {
                Ok(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|e| {
                    RpcError::Configuration(format!(
                        "Invalid LINGUA_REQUEST_TIMEOUT_MS '{}': {}",
                        raw, e
                    ))
                })?),
                Err(_) => DEFAULT_REQUEST_TIMEOUT,
            },
        };

        let url = url.or_else(|| std::env::var("NATS_URL").ok());

        Self::from_parts(&transport_type, url, request_timeout)
    }

    /// Build a configuration from explicit values.
    ///
    /// `url` is only used by the NATS transport; `None` keeps its default.
    pub fn from_parts(
        transport_type: &str,
        url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, RpcError> {
        match transport_type.to_lowercase().as_str() {
            "nats" => {
                let defaults = NatsTransportConfig::default();
                Ok(TransportConfig::Nats(NatsTransportConfig {
                    url: url.unwrap_or(defaults.url),
                    request_timeout,
                }))
            }
            "memory" => Ok(TransportConfig::Memory { request_timeout }),
            other => Err(RpcError::Configuration(format!(
                "Unknown transport type: '{}'. Available types: {}",
                other,
                Self::available_types().join(", ")
            ))),
        }
    }

    /// Returns list of available transport types.
    pub fn available_types() -> Vec<&'static str> {
        vec!["nats", "memory"]
    }

    /// Get the transport type as a string.
    pub fn transport_type(&self) -> &'static str {
        match self {
            TransportConfig::Nats(_) => "nats",
            TransportConfig::Memory { .. } => "memory",
        }
    }

    pub fn request_timeout(&self) -> Duration {
        match self {
            TransportConfig::Nats(config) => config.request_timeout,
            TransportConfig::Memory { request_timeout } => *request_timeout,
        }
    }

    /// Create a concrete transport from this configuration and connect it.
    pub async fn connect(self) -> Result<TransportInstance, RpcError> {
        match self {
            TransportConfig::Nats(config) => {
                let transport = NatsTransport::new(config);
                transport.connect().await?;
                Ok(TransportInstance::Nats(Box::new(transport)))
            }
            TransportConfig::Memory { request_timeout } => Ok(TransportInstance::Memory(
                MemoryTransport::with_request_timeout(request_timeout),
            )),
        }
    }
}

/// Concrete transport instance selected at runtime.
pub enum TransportInstance {
    Nats(Box<NatsTransport>),
    Memory(MemoryTransport),
}

#[async_trait]
impl Transport for TransportInstance {
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<SubscriptionHandle, RpcError> {
        match self {
            TransportInstance::Nats(t) => t.subscribe(channel, handler).await,
            TransportInstance::Memory(t) => t.subscribe(channel, handler).await,
        }
    }

    async fn request(&self, channel: &str, payload: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        match self {
            TransportInstance::Nats(t) => t.request(channel, payload).await,
            TransportInstance::Memory(t) => t.request(channel, payload).await,
        }
    }

    async fn close(&self) -> Result<(), RpcError> {
        match self {
            TransportInstance::Nats(t) => t.close().await,
            TransportInstance::Memory(t) => t.close().await,
        }
    }

    fn transport_type(&self) -> &'static str {
        match self {
            TransportInstance::Nats(t) => t.transport_type(),
            TransportInstance::Memory(t) => t.transport_type(),
        }
    }
}
