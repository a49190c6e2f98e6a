//! Lingua translation record service
//!
//! Serves Language, TranslationKey and TranslationValue records over a
//! request/reply transport.

pub mod service;

pub use lingua_common::subjects;
pub use service::{preload_wire_types, TranslationService};
