//! Record types
//!
//! Three record kinds share the same lifecycle: a caller-assigned `uuid`, a
//! `first_insert` stamp written once by the store and a `last_update` stamp
//! refreshed on every successful write.

use chrono::{DateTime, SubsecRound, Utc};
use lingua_common::Wire;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Sub-second digits kept on stored timestamps (microseconds)
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Current time truncated to [`TIMESTAMP_PRECISION`]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(TIMESTAMP_PRECISION)
}

/// A record kind that a [`RecordStore`](crate::RecordStore) can hold
pub trait Record: Wire + Clone + Send + Sync {
    /// Short label used in error messages and logs ("language", "key", "value")
    const LABEL: &'static str;

    fn uuid(&self) -> &str;

    fn set_uuid(&mut self, uuid: &str);

    fn first_insert(&self) -> DateTime<Utc>;

    fn last_update(&self) -> DateTime<Utc>;

    fn set_timestamps(&mut self, first_insert: DateTime<Utc>, last_update: DateTime<Utc>);

    /// Value that must be unique across the store, if this kind has one
    fn unique_value(&self) -> Option<&str> {
        None
    }
}

/// Marker for kinds whose [`Record::unique_value`] is always present and
/// can be looked up directly.
pub trait UniqueValue: Record {}

/// A language a translation can be written in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub uuid: String,
    pub first_insert: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    /// Locale prefix, e.g. "en-US"
    pub prefix: String,
    /// Display name, e.g. "English"
    pub lang: String,
    /// Native name
    pub title: String,
    /// Flag icon path, e.g. "/static/img/flags/us.png"
    pub img: String,
    /// Abbreviated month names, e.g. "Jan,Feb,Mar,..."
    pub months_short: String,
}

impl Language {
    pub fn new(uuid: impl Into<String>, prefix: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            prefix: prefix.into(),
            lang: lang.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = img.into();
        self
    }

    pub fn with_months_short(mut self, months_short: impl Into<String>) -> Self {
        self.months_short = months_short.into();
        self
    }
}

/// A semantic translation key such as "hello"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKey {
    pub uuid: String,
    pub first_insert: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    /// Unique across all keys
    pub value: String,
}

impl TranslationKey {
    pub fn new(uuid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Translated text for one key in one language.
///
/// `uuid_language` and `uuid_language_key` are not checked against the other
/// stores; a value may reference records that do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationValue {
    pub uuid: String,
    pub first_insert: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub uuid_language: String,
    pub uuid_language_key: String,
    pub value: String,
}

impl TranslationValue {
    pub fn new(
        uuid: impl Into<String>,
        uuid_language: impl Into<String>,
        uuid_language_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            uuid_language: uuid_language.into(),
            uuid_language_key: uuid_language_key.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

impl Wire for Language {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed("Language")
    }
}

impl Wire for TranslationKey {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed("TranslationKey")
    }
}

impl Wire for TranslationValue {
    fn wire_name() -> Cow<'static, str> {
        Cow::Borrowed("TranslationValue")
    }
}

impl Record for Language {
    const LABEL: &'static str = "language";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn set_uuid(&mut self, uuid: &str) {
        self.uuid = uuid.to_string();
    }

    fn first_insert(&self) -> DateTime<Utc> {
        self.first_insert
    }

    fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn set_timestamps(&mut self, first_insert: DateTime<Utc>, last_update: DateTime<Utc>) {
        self.first_insert = first_insert;
        self.last_update = last_update;
    }
}

impl Record for TranslationKey {
    const LABEL: &'static str = "key";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn set_uuid(&mut self, uuid: &str) {
        self.uuid = uuid.to_string();
    }

    fn first_insert(&self) -> DateTime<Utc> {
        self.first_insert
    }

    fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn set_timestamps(&mut self, first_insert: DateTime<Utc>, last_update: DateTime<Utc>) {
        self.first_insert = first_insert;
        self.last_update = last_update;
    }

    fn unique_value(&self) -> Option<&str> {
        Some(&self.value)
    }
}

impl UniqueValue for TranslationKey {}

impl Record for TranslationValue {
    const LABEL: &'static str = "value";

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn set_uuid(&mut self, uuid: &str) {
        self.uuid = uuid.to_string();
    }

    fn first_insert(&self) -> DateTime<Utc> {
        self.first_insert
    }

    fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    fn set_timestamps(&mut self, first_insert: DateTime<Utc>, last_update: DateTime<Utc>) {
        self.first_insert = first_insert;
        self.last_update = last_update;
    }
}
