use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// String key-value persistence, the local-storage analogue.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Apply every write in one step: `Some` sets a key, `None` removes it.
    fn apply(&self, writes: &[(&str, Option<String>)]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn apply(&self, writes: &[(&str, Option<String>)]) -> Result<()> {
        (**self).apply(writes)
    }
}

/// JSON map on disk; each batch rewrites the file through a temp file and a rename
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => Ok(map),
                Err(err) => {
                    // Start over; the next write replaces the unreadable file
                    warn!("Ignoring unreadable session file {}: {}", self.path.display(), err);
                    Ok(BTreeMap::new())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn apply(&self, writes: &[(&str, Option<String>)]) -> Result<()> {
        let mut map = self.read_map()?;
        for (key, value) in writes {
            match value {
                Some(value) => map.insert((*key).to_string(), value.clone()),
                None => map.remove(*key),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&map)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} session keys to {}", map.len(), self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(map.get(key).cloned())
    }

    fn apply(&self, writes: &[(&str, Option<String>)]) -> Result<()> {
        let mut map = self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for (key, value) in writes {
            match value {
                Some(value) => map.insert((*key).to_string(), value.clone()),
                None => map.remove(*key),
            };
        }
        Ok(())
    }
}
