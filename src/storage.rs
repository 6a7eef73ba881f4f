//! Key-value persistence seam.
//!
//! The store keeps its whole collection under a single named key. The
//! embedding layer decides where that key lives: in memory for tests and
//! transient boards, or on disk for a desktop embedding.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// A named-blob store. One key holds one serialized string value.
pub trait Storage {
    /// Read the value under `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Write (or overwrite) the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory storage. Contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: each key is a `<key>.json` file in one directory.
///
/// Writes go through a temp file and a rename so a crash mid-write never
/// leaves a truncated blob behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Storage rooted at the platform data directory (`…/calboard`).
    pub fn in_default_dir() -> io::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no platform data directory")
        })?;
        Ok(FileStorage::new(base.join("calboard")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
