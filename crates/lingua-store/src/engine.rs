//! Generic in-memory record store
//!
//! One store per record kind. The primary map (`uuid -> record`) and the
//! secondary uniqueness index (`value -> uuid`) live behind the same
//! `RwLock`, so every mutation updates both under a single write guard and
//! readers never observe one without the other.

use crate::error::StoreError;
use crate::model::{self, Language, Record, TranslationKey, TranslationValue, UniqueValue};
use parking_lot::RwLock;
use std::collections::HashMap;

pub type LanguageStore = RecordStore<Language>;
pub type TranslationKeyStore = RecordStore<TranslationKey>;
pub type TranslationValueStore = RecordStore<TranslationValue>;

struct Inner<R> {
    items: HashMap<String, R>,
    /// unique value -> owning uuid
    by_value: HashMap<String, String>,
}

impl<R> Default for Inner<R> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            by_value: HashMap::new(),
        }
    }
}

/// Concurrency-safe store for one record kind
pub struct RecordStore<R: Record> {
    inner: RwLock<Inner<R>>,
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Label of the stored kind ("language", "key", "value")
    pub fn kind(&self) -> &'static str {
        R::LABEL
    }

    /// Store a new record, stamping `first_insert` and `last_update`
    pub fn insert(&self, mut record: R) -> Result<(), StoreError> {
        let mut guard = self.inner.write();

        if guard.items.contains_key(record.uuid()) {
            return Err(StoreError::AlreadyExists {
                label: R::LABEL,
                uuid: record.uuid().to_string(),
            });
        }
        if let Some(value) = record.unique_value() {
            if guard.by_value.contains_key(value) {
                return Err(StoreError::DuplicateValue {
                    label: R::LABEL,
                    value: value.to_string(),
                });
            }
        }

        let now = model::now();
        record.set_timestamps(now, now);

        let uuid = record.uuid().to_string();
        if let Some(value) = record.unique_value() {
            guard.by_value.insert(value.to_string(), uuid.clone());
        }
        guard.items.insert(uuid.clone(), record);

        tracing::debug!(kind = R::LABEL, uuid = %uuid, "record inserted");
        Ok(())
    }

    /// Fetch a copy of the record with `uuid`
    pub fn get(&self, uuid: &str) -> Result<R, StoreError> {
        self.inner
            .read()
            .items
            .get(uuid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                label: R::LABEL,
                uuid: uuid.to_string(),
            })
    }

    /// Copies of every stored record, in no particular order
    pub fn list(&self) -> Vec<R> {
        self.inner.read().items.values().cloned().collect()
    }

    /// Replace the record at `uuid`.
    ///
    /// `first_insert` is kept from the stored record and `last_update` never
    /// moves backwards. The stored uuid is always `uuid`, whatever the
    /// incoming record carries.
    pub fn update(&self, uuid: &str, mut record: R) -> Result<(), StoreError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let (first_insert, previous_update, old_value) = match inner.items.get(uuid) {
            Some(existing) => (
                existing.first_insert(),
                existing.last_update(),
                existing.unique_value().map(str::to_string),
            ),
            None => {
                return Err(StoreError::NotFound {
                    label: R::LABEL,
                    uuid: uuid.to_string(),
                })
            }
        };

        let new_value = record.unique_value().map(str::to_string);
        if let Some(value) = new_value.as_deref() {
            if old_value.as_deref() != Some(value) {
                if let Some(owner) = inner.by_value.get(value) {
                    if owner != uuid {
                        return Err(StoreError::DuplicateValue {
                            label: R::LABEL,
                            value: value.to_string(),
                        });
                    }
                }
            }
        }

        record.set_uuid(uuid);
        record.set_timestamps(first_insert, model::now().max(previous_update));

        if old_value != new_value {
            if let Some(old) = old_value {
                inner.by_value.remove(&old);
            }
            if let Some(new) = new_value {
                inner.by_value.insert(new, uuid.to_string());
            }
        }
        inner.items.insert(uuid.to_string(), record);

        tracing::debug!(kind = R::LABEL, uuid = %uuid, "record updated");
        Ok(())
    }

    /// Remove the record at `uuid` together with its index entry
    pub fn delete(&self, uuid: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.write();

        let removed = guard.items.remove(uuid).ok_or_else(|| StoreError::NotFound {
            label: R::LABEL,
            uuid: uuid.to_string(),
        })?;
        if let Some(value) = removed.unique_value() {
            guard.by_value.remove(value);
        }

        tracing::debug!(kind = R::LABEL, uuid = %uuid, "record deleted");
        Ok(())
    }

    /// Check if a record with `uuid` exists
    pub fn contains(&self, uuid: &str) -> bool {
        self.inner.read().items.contains_key(uuid)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }
}

impl<R: UniqueValue> RecordStore<R> {
    /// Look a record up through the secondary index
    pub fn get_by_value(&self, value: &str) -> Result<R, StoreError> {
        let guard = self.inner.read();
        guard
            .by_value
            .get(value)
            .and_then(|uuid| guard.items.get(uuid))
            .cloned()
            .ok_or_else(|| StoreError::ValueNotFound {
                label: R::LABEL,
                value: value.to_string(),
            })
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}
