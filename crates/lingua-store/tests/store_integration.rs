//! End-to-end scenarios against the record stores

use lingua_store::{
    Language, LanguageStore, StoreError, TranslationKey, TranslationKeyStore, TranslationValue,
    TranslationValueStore,
};
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn test_language_lifecycle() {
    let store = LanguageStore::new();

    store
        .insert(Language::new("L1", "en-US", "English").with_img("/static/img/flags/us.png"))
        .unwrap();
    let inserted = store.get("L1").unwrap();
    assert_eq!(inserted.lang, "English");

    store
        .update("L1", Language::new("L1", "en-US", "English (US)"))
        .unwrap();
    let updated = store.get("L1").unwrap();
    assert_eq!(updated.lang, "English (US)");
    assert_eq!(updated.img, "");
    assert_eq!(updated.first_insert, inserted.first_insert);
    assert!(updated.last_update >= inserted.last_update);

    store.delete("L1").unwrap();
    let err = store.get("L1").unwrap_err();
    assert_eq!(err.to_string(), "language not found: L1");
}

#[test]
fn test_key_uniqueness_scenario() {
    let store = TranslationKeyStore::new();

    store.insert(TranslationKey::new("K1", "hello")).unwrap();
    let err = store.insert(TranslationKey::new("K2", "hello")).unwrap_err();
    assert_eq!(err.to_string(), "key value must be unique: hello");

    assert_eq!(store.get_by_value("hello").unwrap().uuid, "K1");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_key_delete_clears_both_lookups() {
    let store = TranslationKeyStore::new();
    store.insert(TranslationKey::new("K1", "hello")).unwrap();
    store.delete("K1").unwrap();

    assert!(matches!(store.get("K1"), Err(StoreError::NotFound { .. })));
    assert!(matches!(
        store.get_by_value("hello"),
        Err(StoreError::ValueNotFound { .. })
    ));
}

#[test]
fn test_values_reference_keys_and_languages() {
    let languages = LanguageStore::new();
    let keys = TranslationKeyStore::new();
    let values = TranslationValueStore::new();

    languages.insert(Language::new("L1", "de-DE", "German")).unwrap();
    keys.insert(TranslationKey::new("K1", "hello")).unwrap();
    values
        .insert(TranslationValue::new("V1", "L1", "K1", "Hallo"))
        .unwrap();

    // deleting the referenced key leaves the value untouched
    keys.delete("K1").unwrap();
    let value = values.get("V1").unwrap();
    assert_eq!(value.uuid_language_key, "K1");
    assert_eq!(value.value, "Hallo");
}

#[test]
fn test_concurrent_distinct_inserts() {
    let store = Arc::new(TranslationValueStore::new());
    let mut handles = vec![];

    for _ in 0..10 {
        let store = Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            for _ in 0..50 {
                let id = Uuid::now_v7().to_string();
                store
                    .insert(TranslationValue::new(id, "L1", "K1", "text"))
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.list().len(), 500);
}
