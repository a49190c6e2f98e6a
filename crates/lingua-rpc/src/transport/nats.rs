//! NATS core request/reply transport

use async_nats::client::RequestErrorKind;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::{MessageHandler, SubscriptionHandle, Transport};
use crate::RpcError;

/// Default time a request waits for its reply
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(1000);

/// NATS transport configuration
#[derive(Debug, Clone)]
pub struct NatsTransportConfig {
    /// NATS server URL (e.g., "nats://localhost:4222")
    pub url: String,
    /// Time a request waits for its reply
    pub request_timeout: Duration,
}

impl Default for NatsTransportConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// NATS core pub/sub transport.
///
/// Each inbound message is handled on its own tokio task and the reply is
/// published to the message's reply subject.
pub struct NatsTransport {
    config: NatsTransportConfig,
    client: RwLock<Option<async_nats::Client>>,
    in_flight: TaskTracker,
}

impl NatsTransport {
    /// Create a new, unconnected NATS transport
    pub fn new(config: NatsTransportConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            in_flight: TaskTracker::new(),
        }
    }

    /// Connect to the NATS server
    pub async fn connect(&self) -> Result<(), RpcError> {
        tracing::info!("Connecting to NATS at {}", self.config.url);

        let client = async_nats::connect(&self.config.url)
            .await
            .map_err(|e| RpcError::Connection(format!("Failed to connect to NATS: {}", e)))?;

        *self.client.write().await = Some(client);

        tracing::info!("Connected to NATS at {}", self.config.url);
        Ok(())
    }

    async fn client(&self) -> Result<async_nats::Client, RpcError> {
        self.client
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(RpcError::NotConnected)
    }
}

#[async_trait]
impl Transport for NatsTransport {
    async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<SubscriptionHandle, RpcError> {
        let client = self.client().await?;

        let mut subscriber = client
            .subscribe(channel.to_string())
            .await
            .map_err(|e| RpcError::Transport(format!("Failed to subscribe to {}: {}", channel, e)))?;

        let cancel_token = CancellationToken::new();
        let cancel_token_clone = cancel_token.clone();

        let channel_owned = channel.to_string();
        let in_flight = self.in_flight.clone();
        tokio::spawn(async move {
            tracing::debug!(channel = %channel_owned, "Starting message loop");

            loop {
                tokio::select! {
                    _ = cancel_token_clone.cancelled() => {
                        if let Err(e) = subscriber.unsubscribe().await {
                            tracing::error!(channel = %channel_owned, "Failed to unsubscribe: {}", e);
                        }
                        break;
                    }
                    next = subscriber.next() => {
                        let Some(message) = next else {
                            tracing::warn!(channel = %channel_owned, "Subscription closed by server");
                            break;
                        };

                        let handler = Arc::clone(&handler);
                        let client = client.clone();
                        let channel = channel_owned.clone();
                        in_flight.spawn(async move {
                            let reply = handler.handle(&message.payload).await;
                            match message.reply {
                                Some(reply_to) => {
                                    if let Err(e) = client.publish(reply_to, Bytes::from(reply)).await {
                                        tracing::error!(channel = %channel, "Failed to publish reply: {}", e);
                                    }
                                }
                                None => {
                                    tracing::debug!(channel = %channel, "Message without reply subject, dropping reply");
                                }
                            }
                        });
                    }
                }
            }

            tracing::debug!(channel = %channel_owned, "Message loop ended");
        });

        Ok(SubscriptionHandle::new(channel.to_string(), cancel_token))
    }

    async fn request(&self, channel: &str, payload: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let client = self.client().await?;

        tracing::debug!(channel = %channel, bytes = payload.len(), "Sending request");

        let response = tokio::time::timeout(
            self.config.request_timeout,
            client.request(channel.to_string(), Bytes::from(payload)),
        )
        .await
        .map_err(|_| RpcError::Timeout(channel.to_string()))?
        .map_err(|e| match e.kind() {
            RequestErrorKind::TimedOut => RpcError::Timeout(channel.to_string()),
            RequestErrorKind::NoResponders => RpcError::NoResponders(channel.to_string()),
            RequestErrorKind::Other => {
                RpcError::Transport(format!("Request on {} failed: {}", channel, e))
            }
        })?;

        Ok(response.payload.to_vec())
    }

    /// Drain and disconnect.
    ///
    /// Waits up to the request timeout for handlers still running to publish
    /// their replies, then flushes. Replies not ready by then are abandoned,
    /// since their requesters have already timed out.
    async fn close(&self) -> Result<(), RpcError> {
        tracing::info!(in_flight = self.in_flight.len(), "Disconnecting from NATS");

        self.in_flight.close();
        if tokio::time::timeout(self.config.request_timeout, self.in_flight.wait())
            .await
            .is_err()
        {
            tracing::warn!(
                abandoned = self.in_flight.len(),
                "In-flight handlers did not finish before close"
            );
        }

        if let Some(client) = self.client.write().await.take() {
            client
                .flush()
                .await
                .map_err(|e| RpcError::Transport(format!("Failed to flush: {}", e)))?;
        }

        tracing::info!("Disconnected from NATS");
        Ok(())
    }

    fn transport_type(&self) -> &'static str {
        "nats"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl MessageHandler for Echo {
        async fn handle(&self, payload: &[u8]) -> Vec<u8> {
            payload.to_vec()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = NatsTransportConfig::default();
        assert_eq!(config.url, "nats://localhost:4222");
        assert_eq!(config.request_timeout, Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_not_connected() {
        let transport = NatsTransport::new(NatsTransportConfig::default());

        let result = transport.request("translations.language.list", vec![]).await;
        assert!(matches!(result, Err(RpcError::NotConnected)));

        let result = transport
            .subscribe("translations.language.list", Arc::new(Echo))
            .await;
        assert!(matches!(result, Err(RpcError::NotConnected)));

        // closing an unconnected transport is a no-op
        transport.close().await.unwrap();
    }

    struct Slow;

    #[async_trait]
    impl MessageHandler for Slow {
        async fn handle(&self, payload: &[u8]) -> Vec<u8> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            payload.to_vec()
        }
    }

    // Integration tests requiring NATS server
    #[tokio::test]
    #[ignore]
    async fn test_close_delivers_in_flight_replies() {
        let server = NatsTransport::new(NatsTransportConfig::default());
        server.connect().await.unwrap();
        let client = Arc::new(NatsTransport::new(NatsTransportConfig::default()));
        client.connect().await.unwrap();

        let handle = server
            .subscribe("lingua.test.slow", Arc::new(Slow))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let requester = Arc::clone(&client);
        let pending = tokio::spawn(async move {
            requester.request("lingua.test.slow", b"late".to_vec()).await
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        // stop accepting, then drain while the handler is still sleeping
        handle.cancel();
        server.close().await.unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), b"late");
        client.close().await.unwrap();
    }


    #[tokio::test]
    #[ignore]
    async fn test_request_reply() {
        let transport = NatsTransport::new(NatsTransportConfig::default());
        transport.connect().await.unwrap();

        let handle = transport
            .subscribe("lingua.test.echo", Arc::new(Echo))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let reply = transport
            .request("lingua.test.echo", b"ping".to_vec())
            .await
            .unwrap();
        assert_eq!(reply, b"ping");

        handle.cancel();
        transport.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_no_responders() {
        let transport = NatsTransport::new(NatsTransportConfig::default());
        transport.connect().await.unwrap();

        let result = transport.request("lingua.test.nobody", vec![]).await;
        assert!(matches!(
            result,
            Err(RpcError::NoResponders(_)) | Err(RpcError::Timeout(_))
        ));

        transport.close().await.unwrap();
    }
}
