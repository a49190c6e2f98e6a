//! In-process transport
//!
//! Routes requests straight to the subscribed handler without a network hop.
//! Used for single-process deployments and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::nats::DEFAULT_REQUEST_TIMEOUT;
use super::{MessageHandler, SubscriptionHandle, Transport};
use crate::RpcError;

struct Route {
    handler: Arc<dyn MessageHandler>,
    cancel_token: CancellationToken,
}

/// In-process request/reply transport.
///
/// One handler per channel; subscribing again replaces the previous handler.
/// Each request runs its handler on a separate tokio task.
pub struct MemoryTransport {
    routes: DashMap<String, Route>,
    request_timeout: Duration,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::with_request_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(request_timeout: Duration) -> Self {
        Self {
            routes: DashMap::new(),
            request_timeout,
        }
    }

    /// Number of channels with a live handler
    pub fn channel_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|route| !route.cancel_token.is_cancelled())
            .count()
    }

    fn handler_for(&self, channel: &str) -> Option<Arc<dyn MessageHandler>> {
        let live = self.routes.get(channel).and_then(|route| {
            if route.cancel_token.is_cancelled() {
                None
            } else {
                Some(Arc::clone(&route.handler))
            }
        });

        if live.is_none() {
            self.routes
                .remove_if(channel, |_, route| route.cancel_token.is_cancelled());
        }
        live
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<SubscriptionHandle, RpcError> {
        let cancel_token = CancellationToken::new();
        let previous = self.routes.insert(
            channel.to_string(),
            Route {
                handler,
                cancel_token: cancel_token.clone(),
            },
        );
        if previous.is_some() {
            tracing::warn!(channel = %channel, "Replacing existing handler");
        }

        tracing::debug!(channel = %channel, "Subscribed");
        Ok(SubscriptionHandle::new(channel.to_string(), cancel_token))
    }

    async fn request(&self, channel: &str, payload: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let handler = self
            .handler_for(channel)
            .ok_or_else(|| RpcError::NoResponders(channel.to_string()))?;

        let task = tokio::spawn(async move { handler.handle(&payload).await });

        tokio::time::timeout(self.request_timeout, task)
            .await
            .map_err(|_| RpcError::Timeout(channel.to_string()))?
            .map_err(|e| RpcError::Transport(format!("Handler for {} failed: {}", channel, e)))
    }

    async fn close(&self) -> Result<(), RpcError> {
        for route in self.routes.iter() {
            route.cancel_token.cancel();
        }
        self.routes.clear();
        Ok(())
    }

    fn transport_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    #[async_trait]
    impl MessageHandler for Upper {
        async fn handle(&self, payload: &[u8]) -> Vec<u8> {
            payload.to_ascii_uppercase()
        }
    }

    struct Slow;

    #[async_trait]
    impl MessageHandler for Slow {
        async fn handle(&self, _payload: &[u8]) -> Vec<u8> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Vec::new()
        }
    }

    struct Panics;

    #[async_trait]
    impl MessageHandler for Panics {
        async fn handle(&self, _payload: &[u8]) -> Vec<u8> {
            panic!("handler blew up");
        }
    }

    #[tokio::test]
    async fn test_request_reply() {
        let transport = MemoryTransport::new();
        transport.subscribe("upper", Arc::new(Upper)).await.unwrap();

        let reply = transport.request("upper", b"hallo".to_vec()).await.unwrap();
        assert_eq!(reply, b"HALLO");
    }

    #[tokio::test]
    async fn test_no_responders() {
        let transport = MemoryTransport::new();
        let result = transport.request("nobody", vec![]).await;
        assert!(matches!(result, Err(RpcError::NoResponders(c)) if c == "nobody"));
    }

    #[tokio::test]
    async fn test_cancelled_subscription_stops_routing() {
        let transport = MemoryTransport::new();
        let handle = transport.subscribe("upper", Arc::new(Upper)).await.unwrap();
        assert_eq!(transport.channel_count(), 1);

        handle.cancel();

        assert_eq!(transport.channel_count(), 0);
        let result = transport.request("upper", b"x".to_vec()).await;
        assert!(matches!(result, Err(RpcError::NoResponders(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let transport = MemoryTransport::with_request_timeout(Duration::from_millis(20));
        transport.subscribe("slow", Arc::new(Slow)).await.unwrap();

        let result = transport.request("slow", vec![]).await;
        assert!(matches!(result, Err(RpcError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_handler_panic_is_reported() {
        let transport = MemoryTransport::new();
        transport.subscribe("boom", Arc::new(Panics)).await.unwrap();

        let result = transport.request("boom", vec![]).await;
        assert!(matches!(result, Err(RpcError::Transport(_))));
    }

    #[tokio::test]
    async fn test_close_drops_routes() {
        let transport = MemoryTransport::new();
        let handle = transport.subscribe("upper", Arc::new(Upper)).await.unwrap();

        transport.close().await.unwrap();

        assert!(handle.is_cancelled());
        assert_eq!(transport.channel_count(), 0);
        assert!(transport.request("upper", vec![]).await.is_err());
    }
}
