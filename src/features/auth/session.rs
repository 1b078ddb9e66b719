//! Session token persistence for authenticated flows. The token lives under a
//! single well-known key so the setup sanitizer can verify its absence.

use crate::app_lib::storage::{KeyValueStore, SESSION_TOKEN_KEY};

/// Persists the session token after a successful login.
/// A write failure (private browsing) leaves the user with an in-memory-only
/// session for this page view.
pub fn store_session_token(store: &impl KeyValueStore, token: &str) {
    let _ = store.set(SESSION_TOKEN_KEY, token);
}

/// Clears the persisted session token. Safe to call when absent.
pub fn clear_session_token(store: &impl KeyValueStore) {
    store.remove(SESSION_TOKEN_KEY);
}

pub fn session_token(store: &impl KeyValueStore) -> Option<String> {
    store.get(SESSION_TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::MemoryStore;

    #[test]
    fn token_round_trips_through_store() {
        let store = MemoryStore::new();
        store_session_token(&store, "tok-123");
        assert_eq!(session_token(&store), Some("tok-123".to_string()));

        clear_session_token(&store);
        assert_eq!(session_token(&store), None);
    }

    #[test]
    fn clearing_missing_token_is_a_no_op() {
        let store = MemoryStore::new();
        clear_session_token(&store);
        assert_eq!(session_token(&store), None);
    }
}
