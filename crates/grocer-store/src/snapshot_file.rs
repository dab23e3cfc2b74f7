//! # Snapshot File
//!
//! Reads and writes the snapshot JSON on disk.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Snapshot ──► JSON ──► cart_data.json.tmp ──► fsync ──► rename ──►     │
//! │                         (same directory)                cart_data.json  │
//! │                                                                         │
//! │  A reader sees either the previous file or the new one, never a         │
//! │  half-written file.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use grocer_core::Snapshot;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Handle to one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes `snapshot`, replacing the whole file atomically.
    pub fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let json = snapshot.to_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::snapshot_io(parent, e))?;
        }

        let tmp = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::snapshot_io(&self.path, e));
        }

        debug!(
            path = ?self.path,
            items = snapshot.items.len(),
            lines = snapshot.cart.len(),
            "Snapshot written"
        );
        Ok(())
    }

    /// Reads the snapshot.
    ///
    /// ## Returns
    /// - `Ok(None)` when the file does not exist (cold start)
    /// - `Err(Core(MalformedSnapshot))` when it cannot be decoded
    pub fn load(&self) -> StoreResult<Option<Snapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::snapshot_io(&self.path, e)),
        };

        let snapshot = Snapshot::from_json(&text)?;
        Ok(Some(snapshot))
    }

    /// Removes the file. Returns whether there was one.
    pub fn delete(&self) -> StoreResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Snapshot file deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::snapshot_io(&self.path, e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
