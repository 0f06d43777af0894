//! # Browser `localStorage` store
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the web platform. The
//! storage handle is looked up on every call; when storage is unavailable
//! (private mode, sandboxed iframe) reads return `None` and writes are dropped.
//! Failed writes (quota, security errors) are logged.

use crate::session::{report_write, KeyValueStore};

#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            report_write("set", key, storage.set_item(key, value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            report_write("remove", key, storage.remove_item(key));
        }
    }
}
