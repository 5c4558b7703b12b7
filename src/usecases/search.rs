use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::store::SharedStore;

/// Trailing-edge debouncer in front of the search-query transition. Each
/// submission aborts the previously scheduled apply, so only the last value
/// of a burst ever reaches the store. No leading-edge call.
pub struct SearchDebouncer {
    store: SharedStore,
    quiet: Duration,
    scheduled: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    pub fn new(store: SharedStore, quiet: Duration) -> Self {
        Self {
            store,
            quiet,
            scheduled: Mutex::new(None),
        }
    }

    pub fn submit(&self, query: &str) {
        let mut scheduled = self
            .scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = scheduled.take() {
            previous.abort();
        }

        let store = Arc::clone(&self.store);
        let query = query.to_owned();
        let quiet = self.quiet;
        *scheduled = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            store.update(|state| state.ui.set_search_query(query));
        }));
    }
}
