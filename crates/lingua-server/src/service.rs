//! Translation service wiring
//!
//! Owns one store per record kind and binds each store's operations to its
//! subjects on a [`Dispatcher`].

use lingua_common::{preload, subjects};
use lingua_rpc::{Dispatcher, Envelope, RpcError, Transport};
use lingua_store::{
    Language, LanguageStore, Record, RecordStore, StoreError, TranslationKey,
    TranslationKeyStore, TranslationValue, TranslationValueStore,
};
use std::sync::Arc;

/// Subjects for the five operations every record kind supports
struct CrudSubjects {
    insert: &'static str,
    update: &'static str,
    delete: &'static str,
    get: &'static str,
    list: &'static str,
}

const LANGUAGE_SUBJECTS: CrudSubjects = CrudSubjects {
    insert: subjects::LANGUAGE_INSERT,
    update: subjects::LANGUAGE_UPDATE,
    delete: subjects::LANGUAGE_DELETE,
    get: subjects::LANGUAGE_GET,
    list: subjects::LANGUAGE_LIST,
};

const KEY_SUBJECTS: CrudSubjects = CrudSubjects {
    insert: subjects::KEY_INSERT,
    update: subjects::KEY_UPDATE,
    delete: subjects::KEY_DELETE,
    get: subjects::KEY_GET,
    list: subjects::KEY_LIST,
};

const VALUE_SUBJECTS: CrudSubjects = CrudSubjects {
    insert: subjects::VALUE_INSERT,
    update: subjects::VALUE_UPDATE,
    delete: subjects::VALUE_DELETE,
    get: subjects::VALUE_GET,
    list: subjects::VALUE_LIST,
};

/// The translation record service
#[derive(Default)]
pub struct TranslationService {
    languages: Arc<LanguageStore>,
    keys: Arc<TranslationKeyStore>,
    values: Arc<TranslationValueStore>,
}

impl TranslationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> &Arc<LanguageStore> {
        &self.languages
    }

    pub fn keys(&self) -> &Arc<TranslationKeyStore> {
        &self.keys
    }

    pub fn values(&self) -> &Arc<TranslationValueStore> {
        &self.values
    }

    /// Bind all sixteen subjects
    pub async fn register<T: Transport>(&self, dispatcher: &Dispatcher<T>) -> Result<(), RpcError> {
        bind_crud(dispatcher, &self.languages, &LANGUAGE_SUBJECTS).await?;
        bind_crud(dispatcher, &self.keys, &KEY_SUBJECTS).await?;
        bind_crud(dispatcher, &self.values, &VALUE_SUBJECTS).await?;

        let keys = Arc::clone(&self.keys);
        dispatcher
            .bind(subjects::KEY_GET_BY_VALUE, move |req: TranslationKey| {
                keys.get_by_value(&req.value)
            })
            .await?;

        tracing::info!(subjects = subjects::ALL.len(), "Translation service registered");
        Ok(())
    }
}

/// Bind insert/update/delete/get/list of `store`.
///
/// Update, delete and get address the record by the request's uuid; list
/// takes no request.
async fn bind_crud<T, R>(
    dispatcher: &Dispatcher<T>,
    store: &Arc<RecordStore<R>>,
    subjects: &CrudSubjects,
) -> Result<(), RpcError>
where
    T: Transport,
    R: Record + Default,
{
    let s = Arc::clone(store);
    dispatcher
        .bind(subjects.insert, move |req: R| s.insert(req))
        .await?;

    let s = Arc::clone(store);
    dispatcher
        .bind(subjects.update, move |req: R| {
            let uuid = req.uuid().to_string();
            s.update(&uuid, req)
        })
        .await?;

    let s = Arc::clone(store);
    dispatcher
        .bind(subjects.delete, move |req: R| s.delete(req.uuid()))
        .await?;

    let s = Arc::clone(store);
    dispatcher
        .bind(subjects.get, move |req: R| s.get(req.uuid()))
        .await?;

    let s = Arc::clone(store);
    dispatcher
        .bind(subjects.list, move |_: ()| Ok::<_, StoreError>(s.list()))
        .await?;

    Ok(())
}

/// Check at startup that every type the service exchanges crosses the wire.
///
/// # Panics
/// Panics if any of them fails to round-trip.
pub fn preload_wire_types() {
    preload::<()>();
    preload::<Envelope<()>>();

    preload_kind::<Language>();
    preload_kind::<TranslationKey>();
    preload_kind::<TranslationValue>();
}

fn preload_kind<R: Record + Default>() {
    preload::<R>();
    preload::<Vec<R>>();
    preload::<Envelope<R>>();
    preload::<Envelope<Vec<R>>>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_rpc::MemoryTransport;
    use std::collections::HashSet;

    #[test]
    fn test_preload_wire_types() {
        preload_wire_types();
    }

    #[tokio::test]
    async fn test_register_binds_every_subject() {
        let transport = Arc::new(MemoryTransport::new());
        let dispatcher = Dispatcher::new(Arc::clone(&transport));
        let service = TranslationService::new();

        service.register(&dispatcher).await.unwrap();

        let bound: HashSet<String> = dispatcher.channels().into_iter().collect();
        let expected: HashSet<String> = subjects::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(bound, expected);
        assert_eq!(transport.channel_count(), 16);
    }

    #[tokio::test]
    async fn test_stores_are_shared_with_bindings() {
        let transport = Arc::new(MemoryTransport::new());
        let dispatcher = Dispatcher::new(Arc::clone(&transport));
        let service = TranslationService::new();
        service.register(&dispatcher).await.unwrap();

        service
            .keys()
            .insert(TranslationKey::new("K1", "hello"))
            .unwrap();

        let reply = transport.request(subjects::KEY_LIST, Vec::new()).await.unwrap();
        let envelope: Envelope<Vec<TranslationKey>> =
            lingua_common::Transcoder::from_bytes(reply).decode().unwrap();
        assert_eq!(envelope.data.map(|keys| keys.len()), Some(1));
    }
}
