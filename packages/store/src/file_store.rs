//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the native counterpart of the browser's `localStorage`. It
//! is used when the client runs outside a browser (tests, tooling) so sessions
//! survive restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>          # file containing the raw value
//! ```
//!
//! A missing or unreadable file reads as an absent key. Write failures are
//! logged and otherwise dropped.

use std::path::PathBuf;

use crate::session::{report_write, KeyValueStore};

/// Filesystem-backed KeyValueStore.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base.join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let result = std::fs::create_dir_all(&self.base)
            .and_then(|()| std::fs::write(self.key_path(key), value));
        report_write("set", key, result);
    }

    fn remove(&self, key: &str) {
        let result = match std::fs::remove_file(self.key_path(key)) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        };
        report_write("remove", key, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("lessonpilot_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        Session {
            token: Some("bearer-token".to_string()),
            email: Some("head@school.ng".to_string()),
            ..Default::default()
        }
        .save(&store);

        // Re-open from same directory
        let store2 = FileStore::new(dir.clone());
        let session = Session::load(&store2);
        assert_eq!(session.token.as_deref(), Some("bearer-token"));
        assert_eq!(session.email.as_deref(), Some("head@school.ng"));

        Session::clear(&store2);
        assert!(!Session::load(&store).is_signed_in());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_path_is_sanitised() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        assert_eq!(store.key_path("../etc"), PathBuf::from("/tmp/base/___etc"));
        assert_eq!(store.key_path("userId"), PathBuf::from("/tmp/base/userId"));
    }

    #[test]
    fn test_failed_write_reads_as_absent() {
        // base exists as a plain file, so no key can be written below it
        let base = std::env::temp_dir().join(format!("lessonpilot_blocked_{}", std::process::id()));
        std::fs::write(&base, "not a directory").unwrap();

        let store = FileStore::new(base.clone());
        store.set("token", "bearer-token");
        assert_eq!(store.get("token"), None);
        store.remove("token");

        let _ = std::fs::remove_file(&base);
    }

    #[test]
    fn test_remove_missing_key_is_quiet() {
        let dir = std::env::temp_dir().join(format!("lessonpilot_missing_{}", std::process::id()));
        let store = FileStore::new(dir);
        store.remove("never-written");
        assert_eq!(store.get("never-written"), None);
    }
}
