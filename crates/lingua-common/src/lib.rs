//! Common utilities for lingua
//!
//! This crate provides the error taxonomy and the wire transcoder shared by
//! the store, the RPC layer, the client and the server, plus the channel
//! names both sides of the service agree on.

pub mod codec;
pub mod error;
pub mod subjects;

pub use codec::{preload, CodecError, Transcoder, Wire};
pub use error::{ErrorKind, LinguaError, Result};
