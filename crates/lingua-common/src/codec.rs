//! Wire transcoding
//!
//! Converts typed values to and from self-describing byte frames. A buffer may
//! hold several frames back to back; decoding consumes them front to back.
//!
//! ```text
//! Frame: [NameLen:2 | Name:N | PayloadLen:4 | Payload (bincode):M]
//! ```
//!
//! Every `Transcoder` owns its buffer. Callers create one per logical
//! operation (one inbound decode, one outbound encode), so concurrent requests
//! never observe each other's bytes and no lock is involved.

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;
use thiserror::Error;

/// Maximum payload size accepted in a single frame (64MB)
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Transcoding error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Unexpected end of data")]
    UnexpectedEof,

    #[error("Buffer is empty")]
    EmptyBuffer,
}

/// A type that can cross the transcoder.
///
/// The wire name is written into every frame and checked on decode, so bytes
/// produced for one type are rejected when decoded as another.
pub trait Wire: Serialize + DeserializeOwned + Send + 'static {
    /// Stable name identifying this type on the wire
    fn wire_name() -> Cow<'static, str>;
}

impl Wire for () {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed("()")
    }
}

impl Wire for String {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }
}

impl<T: Wire> Wire for Vec<T> {
    fn wire_name() -> Cow<'static, str> {
        Cow::Owned(format!("[]{}", T::wire_name()))
    }
}

/// Owned byte buffer with typed encode/decode
#[derive(Debug, Default, Clone)]
pub struct Transcoder {
    buf: Vec<u8>,
    pos: usize,
}

impl Transcoder {
    /// Create an empty transcoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcoder holding inbound wire bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buf: bytes.into(),
            pos: 0,
        }
    }

    /// Replace the buffer contents wholesale
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        self.buf.clear();
        self.buf.extend_from_slice(bytes);
        self.pos = 0;
    }

    /// Unconsumed buffer contents
    pub fn bytes(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Take the unconsumed contents for sending
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
        }
        self.buf
    }

    /// Empty the buffer
    pub fn reset(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// Number of unconsumed bytes
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if nothing is left to decode
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the frame for `value`
    pub fn encode<T: Wire>(&mut self, value: &T) -> Result<(), CodecError> {
        let name = T::wire_name();
        if name.len() > u16::MAX as usize {
            return Err(CodecError::Encoding(format!(
                "type name too long: {} bytes",
                name.len()
            )));
        }

        let payload = bincode_options()
            .serialize(value)
            .map_err(|e| CodecError::Encoding(e.to_string()))?;
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(CodecError::Encoding(format!(
                "payload too large: {} bytes (max 64MB)",
                payload.len()
            )));
        }

        self.buf.reserve(2 + name.len() + 4 + payload.len());
        self.buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        self.buf.extend_from_slice(&payload);
        Ok(())
    }

    /// Consume the frame at the front of the buffer as a `T`
    ///
    /// On error nothing is consumed.
    pub fn decode<T: Wire>(&mut self) -> Result<T, CodecError> {
        let data = &self.buf[self.pos..];
        if data.is_empty() {
            return Err(CodecError::EmptyBuffer);
        }

        let (name, payload, consumed) = split_frame(data)?;
        let expected = T::wire_name();
        if name != expected {
            return Err(CodecError::TypeMismatch {
                expected: expected.into_owned(),
                found: name.to_string(),
            });
        }

        let value: T = bincode_options()
            .deserialize(payload)
            .map_err(|e| CodecError::Decoding(e.to_string()))?;

        self.pos += consumed;
        if self.pos == self.buf.len() {
            self.reset();
        }
        Ok(value)
    }
}

/// Fixed-width little-endian bincode; a payload must be consumed exactly
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Split one frame off the front of `data`: (name, payload, bytes consumed)
fn split_frame(data: &[u8]) -> Result<(&str, &[u8], usize), CodecError> {
    if data.len() < 2 {
        return Err(CodecError::UnexpectedEof);
    }
    let name_len = u16::from_be_bytes([data[0], data[1]]) as usize;
    let mut pos = 2;

    if data.len() < pos + name_len {
        return Err(CodecError::UnexpectedEof);
    }
    let name = std::str::from_utf8(&data[pos..pos + name_len])
        .map_err(|_| CodecError::Decoding("invalid UTF-8 in type name".to_string()))?;
    pos += name_len;

    if data.len() < pos + 4 {
        return Err(CodecError::UnexpectedEof);
    }
    let payload_len =
        u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
    pos += 4;

    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(CodecError::Decoding(format!(
            "payload too large: {} bytes (max 64MB)",
            payload_len
        )));
    }
    if data.len() < pos + payload_len {
        return Err(CodecError::UnexpectedEof);
    }

    Ok((name, &data[pos..pos + payload_len], pos + payload_len))
}

/// Round-trip `T::default()` once so a type that cannot cross the wire fails
/// at startup instead of on the first request.
///
/// # Panics
/// Panics if the value cannot be encoded or decoded.
pub fn preload<T: Wire + Default>() {
    let name = T::wire_name();
    let mut transcoder = Transcoder::new();

    if let Err(e) = transcoder.encode(&T::default()) {
        panic!("failed to encode type metadata for {}: {}", name, e);
    }
    if let Err(e) = transcoder.decode::<T>() {
        panic!("failed to decode type metadata for {}: {}", name, e);
    }

    tracing::debug!(wire_type = %name, "Preloaded wire type");
}
