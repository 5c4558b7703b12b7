use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::{
    chatroom::ChatroomsState, identity::IdentityState, message::MessagesState,
    ui_prefs::UiPreferences,
};

/// The full four-slice state. This is also the persisted snapshot shape: one
/// JSON value, no version tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub identity: IdentityState,
    pub chatrooms: ChatroomsState,
    pub messages: MessagesState,
    pub ui: UiPreferences,
}

type CommitHook = Box<dyn Fn(&AppState) + Send + Sync>;

/// Explicitly constructed state container. All mutation goes through
/// [`Store::update`]; one closure is one logical action and commits
/// atomically before any post-commit hook observes the result.
///
/// Hooks run under the state lock, so they see every commit exactly once and
/// never a state mid-transition. They must not dispatch further updates.
pub struct Store {
    state: Mutex<AppState>,
    hooks: Mutex<Vec<CommitHook>>,
}

pub type SharedStore = Arc<Store>;

impl Store {
    pub fn new(initial: AppState) -> SharedStore {
        Arc::new(Self {
            state: Mutex::new(initial),
            hooks: Mutex::new(Vec::new()),
        })
    }

    /// Applies one logical action and fires post-commit hooks in
    /// registration order with the committed state.
    pub fn update<R>(&self, action: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let out = action(&mut state);

        let hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        for hook in hooks.iter() {
            hook(&state);
        }

        out
    }

    pub fn read<R>(&self, query: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        query(&state)
    }

    pub fn snapshot(&self) -> AppState {
        self.read(AppState::clone)
    }

    /// Registers a post-commit hook. Intended to be called once per concern
    /// at wiring time, before the first update.
    pub fn on_commit(&self, hook: impl Fn(&AppState) + Send + Sync + 'static) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(hook));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::chatroom::Chatroom;

    #[test]
    fn update_commits_multi_slice_actions_atomically() {
        let store = Store::new(AppState::default());
        let room = Chatroom::new();

        store.on_commit(|state| {
            // Every observed commit must already be cross-slice consistent.
            if !state.chatrooms.rooms.is_empty() {
                let id = state.chatrooms.rooms[0].id;
                assert!(!state.messages.is_reply_pending(&id) || !state.messages.messages(&id).is_empty());
            }
        });

        let id = room.id;
        store.update(|state| {
            state.chatrooms.create(room);
            state.messages.append(id, crate::domain::message::Message::user("hi", None));
            state.messages.set_pending_reply(id, true);
        });

        assert_eq!(store.read(|state| state.messages.messages(&id).len()), 1);
    }

    #[test]
    fn hooks_fire_once_per_commit_in_registration_order() {
        let store = Store::new(AppState::default());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_hook = Arc::clone(&first);
        let second_seen = Arc::clone(&second);
        let first_seen = Arc::clone(&first);
        store.on_commit(move |_| {
            first_hook.fetch_add(1, Ordering::SeqCst);
        });
        store.on_commit(move |_| {
            assert!(first_seen.load(Ordering::SeqCst) > second_seen.load(Ordering::SeqCst));
            second_seen.fetch_add(1, Ordering::SeqCst);
        });

        store.update(|state| state.ui.toggle_dark_mode());
        store.update(|state| state.ui.toggle_dark_mode());

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn snapshot_is_a_detached_copy() {
        let store = Store::new(AppState::default());

        let before = store.snapshot();
        store.update(|state| state.ui.set_search_query("rust"));

        assert!(before.ui.search_query.is_empty());
        assert_eq!(store.read(|state| state.ui.search_query.clone()), "rust");
    }
}
