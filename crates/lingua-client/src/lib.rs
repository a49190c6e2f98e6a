//! Client for the lingua translation service
//!
//! Typed async calls for every service subject over any [`Transport`].

mod client;

pub use client::{ClientError, TranslationClient};
pub use lingua_rpc::{Transport, TransportConfig, TransportInstance};
pub use lingua_store::{Language, TranslationKey, TranslationValue};
