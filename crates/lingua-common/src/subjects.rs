//! Channel names of the translation service

pub const LANGUAGE_INSERT: &str = "translations.language.insert";
pub const LANGUAGE_UPDATE: &str = "translations.language.update";
pub const LANGUAGE_DELETE: &str = "translations.language.delete";
pub const LANGUAGE_GET: &str = "translations.language.get";
pub const LANGUAGE_LIST: &str = "translations.language.list";

pub const KEY_INSERT: &str = "translations.language_key.insert";
pub const KEY_UPDATE: &str = "translations.language_key.update";
pub const KEY_DELETE: &str = "translations.language_key.delete";
pub const KEY_GET: &str = "translations.language_key.get";
pub const KEY_GET_BY_VALUE: &str = "translations.language_key.get_by_value";
pub const KEY_LIST: &str = "translations.language_key.list";

pub const VALUE_INSERT: &str = "translations.language_value.insert";
pub const VALUE_UPDATE: &str = "translations.language_value.update";
pub const VALUE_DELETE: &str = "translations.language_value.delete";
pub const VALUE_GET: &str = "translations.language_value.get";
pub const VALUE_LIST: &str = "translations.language_value.list";

/// Every subject the service answers on
pub const ALL: [&str; 16] = [
    LANGUAGE_INSERT,
    LANGUAGE_UPDATE,
    LANGUAGE_DELETE,
    LANGUAGE_GET,
    LANGUAGE_LIST,
    KEY_INSERT,
    KEY_UPDATE,
    KEY_DELETE,
    KEY_GET,
    KEY_GET_BY_VALUE,
    KEY_LIST,
    VALUE_INSERT,
    VALUE_UPDATE,
    VALUE_DELETE,
    VALUE_GET,
    VALUE_LIST,
];
