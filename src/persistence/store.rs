use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{EditorError, Result};

/// Store kept entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_saves: bool,
}

impl MemoryStore {
    /// A store whose writes always fail, as when storage is full.
    pub fn failing() -> Self {
        Self {
            entries: BTreeMap::new(),
            fail_saves: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_saves {
            return Err(EditorError::Persistence("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Entries are cached in memory; every save rewrites the file through a
/// temporary sibling and a rename so readers never see a partial file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default file name inside the data directory.
    pub const FILE_NAME: &'static str = "store.json";

    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns [`EditorError::Persistence`] if the file exists but cannot be
    /// read or is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                EditorError::Persistence(format!("failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                EditorError::Persistence(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "store.open");
        Ok(Self { path, entries })
    }

    /// Open `FILE_NAME` inside `dir`.
    ///
    /// # Errors
    /// See [`FileStore::open`].
    pub fn open_in(dir: &Path) -> Result<Self> {
        Self::open(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(std::io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            // Keep the cache in step with what is on disk.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(EditorError::Persistence(format!(
                "failed to write {}: {err}",
                self.path.display()
            )));
        }
        Ok(())
    }
}
