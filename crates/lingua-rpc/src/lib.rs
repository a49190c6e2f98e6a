//! Typed request/reply over publish/subscribe
//!
//! # Features
//! - Response envelope with status, error text and error kind
//! - Transport abstraction with NATS and in-process implementations
//! - Dispatcher binding typed handlers to named channels
//! - Runtime transport selection from the environment

pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod transport;

pub use dispatcher::{BoundHandler, Dispatcher};
pub use envelope::{Envelope, STATUS_ERROR, STATUS_OK};
pub use error::RpcError;
pub use transport::{
    MemoryTransport, MessageHandler, NatsTransport, NatsTransportConfig, SubscriptionHandle,
    Transport, TransportConfig, TransportInstance,
};
