use std::sync::Arc;
use toolgate_store::{DataStore, SqliteStore};
use toolgate_tools::{ToolDispatcher, ToolServices, builtin_catalog};

/// In-memory SQLite store loaded with the bundled ticket seed.
pub fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("in-memory store");
    store.seed_default().expect("seed");
    store
}

/// Dispatcher over the built-in catalog and a seeded in-memory store.
pub fn seeded_dispatcher() -> ToolDispatcher {
    dispatcher_with(ToolServices::new(Arc::new(seeded_store())))
}

/// Dispatcher over the built-in catalog and the given services.
pub fn dispatcher_with(services: ToolServices) -> ToolDispatcher {
    let catalog = builtin_catalog(services.default_top_k).expect("builtin catalog");
    ToolDispatcher::new(catalog, services)
}

/// Type-erase a store for `ToolServices::new`.
pub fn shared_store<S: DataStore + 'static>(store: S) -> Arc<dyn DataStore> {
    Arc::new(store)
}
