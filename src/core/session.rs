//! Persisted session flags.
//!
//! Two small localStorage entries let wallet intent survive reloads: a
//! disconnect flag set by an explicit disconnect, and the last exposed
//! account. Neither is load-bearing for correctness; they only steer
//! whether automatic reconnection is attempted. The auth token and the
//! captured referral code live here too.
//!
//! Storage sits behind [`SessionStore`] so flows can run against an
//! in-memory map in native tests.

use crate::config;
use crate::utils::dom;

/// Minimal string key-value store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `SessionStore` over browser localStorage.
///
/// Every operation degrades to a no-op when storage is unavailable
/// (private browsing, storage quota, non-browser target).
#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl SessionStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// ============================================================================
// Wallet Flags
// ============================================================================

/// Whether the user explicitly disconnected and has not reconnected since.
pub fn manually_disconnected(store: &dyn SessionStore) -> bool {
    store.get(config::DISCONNECT_FLAG_KEY).as_deref() == Some("true")
}

/// Record an explicit (or externally forced) disconnect.
///
/// Sets the suppression flag and drops the remembered account. Idempotent.
pub fn record_disconnect(store: &dyn SessionStore) {
    store.set(config::DISCONNECT_FLAG_KEY, "true");
    store.remove(config::LAST_ACCOUNT_KEY);
}

/// Drop the suppression flag; called at the start of every explicit
/// connect so background re-checks resume.
pub fn clear_disconnect_flag(store: &dyn SessionStore) {
    store.remove(config::DISCONNECT_FLAG_KEY);
}

/// Remember the active account across reloads.
pub fn remember_account(store: &dyn SessionStore, account: &str) {
    store.set(config::LAST_ACCOUNT_KEY, account);
}

/// Last account exposed by the provider, if any.
pub fn last_account(store: &dyn SessionStore) -> Option<String> {
    store.get(config::LAST_ACCOUNT_KEY)
}

// ============================================================================
// Auth Session
// ============================================================================

/// Persist the API session after a successful sign-in.
pub fn store_auth(store: &dyn SessionStore, token: &str, username: &str) {
    store.set(config::AUTH_TOKEN_KEY, token);
    store.set(config::AUTH_USER_KEY, username);
}

/// Bearer token of the current API session.
pub fn auth_token(store: &dyn SessionStore) -> Option<String> {
    store.get(config::AUTH_TOKEN_KEY)
}

/// Username of the current API session.
pub fn auth_username(store: &dyn SessionStore) -> Option<String> {
    store.get(config::AUTH_USER_KEY)
}

/// Drop the API session.
pub fn clear_auth(store: &dyn SessionStore) {
    store.remove(config::AUTH_TOKEN_KEY);
    store.remove(config::AUTH_USER_KEY);
}

// ============================================================================
// Referral Capture
// ============================================================================

/// Keep a referral code seen in the landing URL for later sign-up.
pub fn store_referral(store: &dyn SessionStore, code: &str) {
    store.set(config::REFERRAL_KEY, code);
}

/// Referral code captured earlier in this browser, if any.
pub fn referral_code(store: &dyn SessionStore) -> Option<String> {
    store.get(config::REFERRAL_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MemoryStore;

    #[test]
    fn test_disconnect_flag_round_trip() {
        let store = MemoryStore::default();
        assert!(!manually_disconnected(&store));
        record_disconnect(&store);
        assert!(manually_disconnected(&store));
        clear_disconnect_flag(&store);
        assert!(!manually_disconnected(&store));
    }

    #[test]
    fn test_record_disconnect_forgets_account() {
        let store = MemoryStore::default();
        remember_account(&store, "0xabc");
        record_disconnect(&store);
        assert_eq!(last_account(&store), None);
    }

    #[test]
    fn test_auth_round_trip() {
        let store = MemoryStore::default();
        store_auth(&store, "tok-1", "rin");
        assert_eq!(auth_token(&store).as_deref(), Some("tok-1"));
        assert_eq!(auth_username(&store).as_deref(), Some("rin"));
        clear_auth(&store);
        assert_eq!(auth_token(&store), None);
    }

    #[test]
    fn test_referral_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(referral_code(&store), None);
        store_referral(&store, "FRIEND42");
        assert_eq!(referral_code(&store).as_deref(), Some("FRIEND42"));
    }
}
