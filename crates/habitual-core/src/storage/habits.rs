//! Per-user habit persistence.
//!
//! Each user's collection lives in its own `<username>_habits.json` and is
//! rewritten whole on every save. There is no locking.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::collection::HabitCollection;
use crate::error::{Result, StorageError};

/// Load and save a named habit collection.
pub trait HabitStore {
    /// Read the collection stored under `key`.
    ///
    /// Missing and unreadable data come back as [`StorageError::Missing`] and
    /// [`StorageError::Corrupt`]; callers are expected to recover from both.
    fn load(&self, key: &str) -> Result<HabitCollection, StorageError>;

    /// Overwrite the collection stored under `key`.
    fn save(&self, key: &str, habits: &HabitCollection) -> Result<()>;
}

/// JSON files in a single directory, one per user.
#[derive(Debug, Clone)]
pub struct JsonHabitStore {
    dir: PathBuf,
}

impl JsonHabitStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`super::data_dir`].
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(super::data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}_habits.json"))
    }
}

impl HabitStore for JsonHabitStore {
    fn load(&self, key: &str) -> Result<HabitCollection, StorageError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::Missing { path });
            }
            Err(e) => {
                return Err(StorageError::Corrupt {
                    path,
                    message: e.to_string(),
                });
            }
        };

        let habits: HabitCollection =
            serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                path: path.clone(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), habits = habits.len(), "habits loaded");
        Ok(habits)
    }

    fn save(&self, key: &str, habits: &HabitCollection) -> Result<()> {
        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(habits)?;
        std::fs::write(&path, content)
            .map_err(|source| StorageError::WriteFailed { path: path.clone(), source })?;
        info!(path = %path.display(), habits = habits.len(), "habits saved");
        Ok(())
    }
}
