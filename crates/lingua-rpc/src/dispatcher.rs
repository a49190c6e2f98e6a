//! Binds typed handlers to transport channels
//!
//! For every inbound message the dispatcher decodes the request with a fresh
//! [`Transcoder`], runs the handler, wraps the outcome in an [`Envelope`] and
//! encodes the reply with another fresh `Transcoder`.

use async_trait::async_trait;
use lingua_common::{LinguaError, Transcoder, Wire};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::envelope::Envelope;
use crate::transport::{MessageHandler, SubscriptionHandle, Transport};
use crate::RpcError;

/// Adapts a typed `Fn(Req) -> Result<Resp, E>` into a [`MessageHandler`]
pub struct BoundHandler<Req, Resp, E, F> {
    channel: String,
    handler: F,
    _marker: PhantomData<fn(Req) -> Result<Resp, E>>,
}

impl<Req, Resp, E, F> BoundHandler<Req, Resp, E, F>
where
    Req: Wire + Default,
    Resp: Wire,
    E: Into<LinguaError>,
    F: Fn(Req) -> Result<Resp, E> + Send + Sync + 'static,
{
    pub fn new(channel: impl Into<String>, handler: F) -> Self {
        Self {
            channel: channel.into(),
            handler,
            _marker: PhantomData,
        }
    }

    /// Decode, run and wrap one request. Empty payloads mean `Req::default()`.
    pub fn call(&self, payload: &[u8]) -> Envelope<Resp> {
        let request = if payload.is_empty() {
            Req::default()
        } else {
            match Transcoder::from_bytes(payload).decode::<Req>() {
                Ok(request) => request,
                Err(e) => {
                    let err = LinguaError::from(e);
                    tracing::warn!(
                        channel = %self.channel,
                        kind = %err.kind(),
                        "Failed to decode request: {}",
                        err
                    );
                    return Envelope::failure(&err);
                }
            }
        };

        match (self.handler)(request) {
            Ok(response) => Envelope::ok(response),
            Err(e) => {
                let err: LinguaError = e.into();
                tracing::debug!(channel = %self.channel, kind = %err.kind(), "Handler failed: {}", err);
                Envelope::failure(&err)
            }
        }
    }

    /// Encode `envelope`, falling back to an error-only envelope
    fn encode(&self, envelope: &Envelope<Resp>) -> Vec<u8> {
        let mut transcoder = Transcoder::new();
        match transcoder.encode(envelope) {
            Ok(()) => transcoder.into_bytes(),
            Err(e) => {
                let err = LinguaError::from(e);
                tracing::error!(channel = %self.channel, "Failed to encode reply: {}", err);

                let mut transcoder = Transcoder::new();
                match transcoder.encode(&Envelope::<Resp>::failure(&err)) {
                    Ok(()) => transcoder.into_bytes(),
                    Err(e) => {
                        tracing::error!(channel = %self.channel, "Failed to encode error reply: {}", e);
                        Vec::new()
                    }
                }
            }
        }
    }
}

#[async_trait]
impl<Req, Resp, E, F> MessageHandler for BoundHandler<Req, Resp, E, F>
where
    Req: Wire + Default,
    Resp: Wire,
    E: Into<LinguaError>,
    F: Fn(Req) -> Result<Resp, E> + Send + Sync + 'static,
{
    async fn handle(&self, payload: &[u8]) -> Vec<u8> {
        let envelope = self.call(payload);
        self.encode(&envelope)
    }
}

/// Owns the subscriptions created for bound handlers
pub struct Dispatcher<T: Transport> {
    transport: Arc<T>,
    subscriptions: Mutex<Vec<SubscriptionHandle>>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Subscribe `handler` to `channel`
    pub async fn bind<Req, Resp, E, F>(&self, channel: &str, handler: F) -> Result<(), RpcError>
    where
        Req: Wire + Default,
        Resp: Wire,
        E: Into<LinguaError> + 'static,
        F: Fn(Req) -> Result<Resp, E> + Send + Sync + 'static,
    {
        let bound: Arc<dyn MessageHandler> = Arc::new(BoundHandler::new(channel, handler));
        let handle = self.transport.subscribe(channel, bound).await?;

        tracing::info!(
            channel = %channel,
            request = %Req::wire_name(),
            response = %Resp::wire_name(),
            "Bound handler"
        );
        self.subscriptions.lock().push(handle);
        Ok(())
    }

    /// Channels with an active binding
    pub fn channels(&self) -> Vec<String> {
        self.subscriptions
            .lock()
            .iter()
            .filter(|handle| !handle.is_cancelled())
            .map(|handle| handle.channel.clone())
            .collect()
    }

    /// Cancel every subscription created by [`bind`](Self::bind)
    pub fn shutdown(&self) {
        let handles = std::mem::take(&mut *self.subscriptions.lock());
        tracing::info!(count = handles.len(), "Shutting down dispatcher");
        for handle in handles {
            handle.cancel();
        }
    }
}
