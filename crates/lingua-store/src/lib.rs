//! In-memory record storage for lingua
//!
//! # Features
//! - Language, TranslationKey and TranslationValue record kinds
//! - Generic `RecordStore<R>` with an optional secondary uniqueness index
//! - Concurrent reads, exclusive writes (parking_lot `RwLock`)
//! - Microsecond-precision lifecycle timestamps

pub mod engine;
pub mod error;
pub mod model;

pub use engine::{LanguageStore, RecordStore, TranslationKeyStore, TranslationValueStore};
pub use error::StoreError;
pub use model::{Language, Record, TranslationKey, TranslationValue, UniqueValue};
