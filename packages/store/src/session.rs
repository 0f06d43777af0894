//! # Session persistence — the signed-in user as seen by the browser
//!
//! The REST backend issues a bearer token at login. The client keeps that token
//! and a copy of the user profile in browser storage under fixed keys so a page
//! reload does not sign the user out:
//!
//! | Key | Value |
//! |-----|-------|
//! | `token` | Bearer token string |
//! | `user` | JSON of the profile returned by the login / profile endpoint |
//! | `userId` | Profile id |
//! | `email` | Profile email (also used by the verification page) |
//!
//! Storage is abstracted behind [`KeyValueStore`] so the same [`Session`] logic
//! works against `localStorage` ([`crate::LocalStore`]), the filesystem
//! ([`crate::FileStore`]) and memory ([`crate::MemoryStore`]).

/// Well-known storage keys.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const USER_ID: &str = "userId";
    pub const EMAIL: &str = "email";
    pub const CONFIG: &str = "config";
}

/// Log a failed storage write. Returns whether the write went through.
pub(crate) fn report_write<E: std::fmt::Debug>(action: &str, key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(key, ?err, "storage {action} failed");
            false
        }
    }
}

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The persisted session. Every field is optional because any of them may be
/// missing or cleared independently by the browser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    /// Raw profile JSON; decoded by the `api` crate.
    pub user_json: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

impl Session {
    /// Read the session from storage. Empty values are treated as absent.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let read = |key: &str| store.get(key).filter(|v| !v.trim().is_empty());
        Self {
            token: read(keys::TOKEN),
            user_json: read(keys::USER),
            user_id: read(keys::USER_ID),
            email: read(keys::EMAIL),
        }
    }

    /// Write every present field; absent fields are removed from storage.
    pub fn save(&self, store: &impl KeyValueStore) {
        let pairs = [
            (keys::TOKEN, &self.token),
            (keys::USER, &self.user_json),
            (keys::USER_ID, &self.user_id),
            (keys::EMAIL, &self.email),
        ];
        for (key, value) in pairs {
            match value {
                Some(v) => store.set(key, v),
                None => store.remove(key),
            }
        }
    }

    /// Remove all session keys (sign out).
    pub fn clear(store: &impl KeyValueStore) {
        for key in [keys::TOKEN, keys::USER, keys::USER_ID, keys::EMAIL] {
            store.remove(key);
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}
