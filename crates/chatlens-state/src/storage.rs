use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Capability for persisting one scoped context blob.
///
/// A single opaque string under a single key; best-effort semantics are
/// decided by the caller.
pub trait Storage: Send + Sync {
    /// Read the blob, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<String>>;

    /// Overwrite the blob
    fn save(&self, blob: &str) -> Result<()>;

    /// Remove the blob entirely
    fn clear(&self) -> Result<()>;
}

/// File-backed storage: one JSON file under the platform data directory
pub struct FsStorage {
    path: PathBuf,
}

impl FsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/chatlens/context.json`, with a
    /// `~/.chatlens` fallback for systems without an XDG data directory
    pub fn default_path() -> Result<PathBuf> {
        if let Some(data_dir) = dirs::data_dir() {
            return Ok(data_dir.join("chatlens").join("context.json"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Ok(PathBuf::from(home).join(".chatlens").join("context.json"));
        }

        Err(Error::Storage(
            "could not determine storage path: no HOME or XDG data directory".to_string(),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FsStorage {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, blob)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.lock().unwrap().clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        *self.blob.lock().unwrap() = Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.blob.lock().unwrap() = None;
        Ok(())
    }
}
