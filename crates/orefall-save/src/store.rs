//! Durable backends for the save document.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{SaveError, SaveResult};

/// A place a serialized save document can be read from and written to.
pub trait SaveStore: Send {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> SaveResult<Option<String>>;

    fn write(&self, contents: &str) -> SaveResult<()>;
}

/// One pretty-printed JSON file. Writes go through a sibling temp file and a
/// rename so a crash mid-write never leaves a truncated save behind.
#[derive(Debug, Clone)]
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
}

impl SaveStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn read(&self) -> SaveResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> SaveResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = contents.len(), "save written");
        Ok(())
    }
}

/// Lightweight key-value store: a flat JSON object of string keys to string
/// values, shared with other preferences. The save lives under one key.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
    key: String,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn load_map(&self) -> SaveResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SaveStore for PrefsStore {
    fn name(&self) -> &str {
        "prefs"
    }

    fn read(&self) -> SaveResult<Option<String>> {
        Ok(self.load_map()?.remove(&self.key))
    }

    fn write(&self, contents: &str) -> SaveResult<()> {
        // An unreadable prefs file is replaced rather than blocking the save.
        let mut map = self.load_map().unwrap_or_default();
        map.insert(self.key.clone(), contents.to_string());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string(&map)?)?;
        Ok(())
    }
}

/// In-process store. Clones share the same slot, so a test can keep a handle
/// and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
            failing: false,
        }
    }

    /// A store whose every read and write fails.
    pub fn failing() -> Self {
        Self {
            slot: Arc::default(),
            failing: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SaveStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self) -> SaveResult<Option<String>> {
        if self.failing {
            return Err(SaveError::Unavailable("memory store disabled"));
        }
        let slot = self
            .slot
            .lock()
            .map_err(|_| SaveError::Unavailable("memory store poisoned"))?;
        Ok(slot.clone())
    }

    fn write(&self, contents: &str) -> SaveResult<()> {
        if self.failing {
            return Err(SaveError::Unavailable("memory store disabled"));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| SaveError::Unavailable("memory store poisoned"))?;
        *slot = Some(contents.to_string());
        Ok(())
    }
}
