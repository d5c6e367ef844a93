//! Key/value persistence for the buffer and UI theme.
//!
//! The core never talks to a storage backend directly. It goes through
//! [`PersistenceBridge`], which wraps an injected [`KeyValueStore`] with
//! typed keys and swallows write failures.

mod store;

pub use store::{FileStore, MemoryStore};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ThemeMode;
use crate::error::{EditorError, Result};

/// Document shown on first launch.
pub const DEFAULT_CONTENT: &str = include_str!("default.md");

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    /// Returns [`EditorError::Persistence`] when the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns [`EditorError::Persistence`] when the backend rejects the write.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The entries the editor persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Content,
    Theme,
}

impl StoreKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "markdown-content",
            Self::Theme => "theme",
        }
    }
}

/// Typed access to a [`KeyValueStore`].
///
/// Values are stored JSON-encoded. Reads fall back to a default, writes
/// log a warning on failure and leave the in-memory state authoritative.
pub struct PersistenceBridge {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// A bridge over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Load `key`, or `default` when missing or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        match self.store.load(key.as_str()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = key.as_str(), %err, "persistence.decode_failed");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(key = key.as_str(), %err, "persistence.load_failed");
                default
            }
        }
    }

    /// Save `value` under `key`.
    ///
    /// # Errors
    /// Returns [`EditorError::Persistence`] if encoding or the store fails.
    pub fn try_save<T: Serialize + ?Sized>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| EditorError::Persistence(e.to_string()))?;
        self.store.save(key.as_str(), &raw)
    }

    /// Save `value` under `key`, logging and swallowing failures.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: StoreKey, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            tracing::warn!(key = key.as_str(), %err, "persistence.save_failed");
        }
    }

    pub fn load_content(&self) -> String {
        self.load(StoreKey::Content, DEFAULT_CONTENT.to_string())
    }

    pub fn save_content(&mut self, content: &str) {
        self.save(StoreKey::Content, content);
    }

    pub fn load_theme(&self) -> ThemeMode {
        self.load(StoreKey::Theme, ThemeMode::default())
    }

    pub fn save_theme(&mut self, theme: ThemeMode) {
        self.save(StoreKey::Theme, &theme);
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge").finish_non_exhaustive()
    }
}
