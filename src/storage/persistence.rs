//! JSON file persistence for the recipe store
//!
//! The whole [`StoreDocument`] is written to a temporary file next to the
//! target, synced, and renamed over the target, so readers only ever observe
//! a complete document.

use super::document::StoreDocument;
use super::engine::DocumentStore;
use crate::core::{Result, StoreError};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

// ============================================================================
// Recovery Policy
// ============================================================================

/// What `read` does when the store file exists but cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Treat an unreadable or malformed file as empty and start over
    #[default]
    Reset,
    /// Surface the problem as [`StoreError::Corrupted`]
    Strict,
}

// ============================================================================
// JSON File Store
// ============================================================================

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    recovery: RecoveryMode,
}

impl JsonFileStore {
    /// Opens a store at `path`, creating the parent directory when missing
    ///
    /// The file itself is created lazily by the first write.
    pub fn open<P: AsRef<Path>>(path: P, recovery: RecoveryMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(parent_dir(&path))?;
        Ok(Self { path, recovery })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn recovery_mode(&self) -> RecoveryMode {
        self.recovery
    }

    fn recover(&self, reason: String) -> Result<StoreDocument> {
        match self.recovery {
            RecoveryMode::Reset => {
                warn!(path = %self.path.display(), %reason, "store file unusable, starting from an empty document");
                Ok(StoreDocument::default())
            }
            RecoveryMode::Strict => Err(StoreError::Corrupted {
                path: self.path.clone(),
                reason,
            }),
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self) -> Result<StoreDocument> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(e) => return self.recover(format!("failed to read: {}", e)),
        };

        match serde_json::from_str::<StoreDocument>(&raw) {
            Ok(document) => Ok(document),
            Err(e) => self.recover(format!("failed to parse: {}", e)),
        }
    }

    fn write(&self, document: &StoreDocument) -> Result<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), recipes = document.recipes.len(), "store document written");
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
