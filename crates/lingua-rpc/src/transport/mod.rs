//! Message transports
//!
//! Provides the request/reply abstraction the dispatcher and the client are
//! written against, plus its NATS and in-process implementations.

pub mod config;
pub mod memory;
pub mod nats;

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::RpcError;

/// Handler for inbound request payloads.
///
/// Returns the reply bytes. Failures are expected to be encoded into the
/// reply itself, so there is no error path here.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, payload: &[u8]) -> Vec<u8>;
}

/// Trait for request/reply transport implementations
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Deliver every request on `channel` to `handler`, replying with its output
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<SubscriptionHandle, RpcError>;

    /// Send `payload` on `channel` and wait for the reply
    async fn request(&self, channel: &str, payload: Vec<u8>) -> Result<Vec<u8>, RpcError>;

    /// Flush pending traffic and release the connection
    async fn close(&self) -> Result<(), RpcError>;

    /// Transport name for logging
    fn transport_type(&self) -> &'static str;
}

/// Handle for managing subscriptions
#[derive(Debug)]
pub struct SubscriptionHandle {
    /// Channel name
    pub channel: String,
    /// Cancellation token
    cancel_token: CancellationToken,
}

impl SubscriptionHandle {
    /// Create a new subscription handle
    pub fn new(channel: String, cancel_token: CancellationToken) -> Self {
        Self {
            channel,
            cancel_token,
        }
    }

    /// Cancel the subscription
    pub fn cancel(&self) {
        tracing::info!(channel = %self.channel, "Cancelling subscription");
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

pub use config::{TransportConfig, TransportInstance};
pub use memory::MemoryTransport;
pub use nats::{NatsTransport, NatsTransportConfig};
