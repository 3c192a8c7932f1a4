mod config;
pub mod database;
pub mod keys;
mod memory;

pub use config::{Config, DisplayConfig, FocusConfig, LogConfig, NotificationsConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Durable string key/value store.
///
/// Values are stringified primitives; an absent key means "use the
/// documented default" to the reader.
pub trait KvStore {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Returns the klock data directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Location of the data directory, without touching the filesystem.
///
/// `KLOCK_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/klock`, or `~/.config/klock-dev` when `KLOCK_ENV=dev`.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("KLOCK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("KLOCK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("klock-dev")
            } else {
                base_dir.join("klock")
            }
        }
    }
}
