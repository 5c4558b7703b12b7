use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Chatrooms deliberately survive logout; this reports how many did.
    pub chatrooms_retained: usize,
}

/// Resets the identity slice to its initial state. Chatrooms, messages, and
/// UI preferences are retained — an explicit contract of this client, not an
/// oversight.
pub fn logout(store: &Store) -> LogoutOutcome {
    let retained = store.update(|state| {
        state.identity.logout();
        state.chatrooms.rooms.len()
    });

    tracing::info!(chatrooms_retained = retained, "logged out");
    LogoutOutcome {
        chatrooms_retained: retained,
    }
}
