pub mod config;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::ClientConfig;
pub use session::{keys, KeyValueStore, Session};

/// Create the platform-appropriate session store.
///
/// - **Web** (WASM + `web` feature): `window.localStorage` via [`LocalStore`]
/// - **Native**: one file per key under `<data_dir>/lessonpilot/` via [`FileStore`]
/// - **WASM without `web`**: an in-memory store
pub fn make_store() -> impl KeyValueStore + Clone {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        LocalStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("lessonpilot");
        FileStore::new(base)
    }
}
