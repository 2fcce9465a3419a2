//! Durable blob storage for the application state.
//!
//! The whole `AppState` is stored as one JSON blob under a fixed key and is
//! overwritten on every save. Reading never fails from the caller's point of
//! view: a missing, unreadable, or corrupt blob yields default state.

use crate::{AppState, Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Logical key the state blob is stored under
pub const STATE_KEY: &str = "onePunchManData";

/// Key-value store holding opaque text blobs
pub trait BlobStore: Send + Sync {
    /// Read the blob under `key`; `Ok(None)` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob under `key`
    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// One `<key>.json` file per blob inside a data directory
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Sidecar file whose lock guards the blob under `key`
    ///
    /// The blob itself is replaced by rename on every write, so a lock taken
    /// on it would only cover a file that is about to be unlinked.
    pub fn lock_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", key))
    }

    fn open_lock(&self, key: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path_for(key))
    }

    fn read_locked(&self, key: &str, path: &Path) -> std::io::Result<String> {
        let lock = self.open_lock(key)?;
        lock.lock_shared()?;

        let mut contents = String::new();
        let result = File::open(path)
            .and_then(|file| std::io::BufReader::new(file).read_to_string(&mut contents));
        let _ = lock.unlock();
        result?;

        Ok(contents)
    }

    /// Atomically writes by:
    /// 1. Taking the exclusive sidecar lock, so writers from other processes
    ///    queue up and readers never interleave with a rename
    /// 2. Writing to a temp file in the same directory
    /// 3. Syncing to disk
    /// 4. Renaming over the original
    fn write_atomic(&self, key: &str, path: &Path, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let lock = self.open_lock(key)?;
        lock.lock_exclusive()?;

        let result = Self::replace(&self.dir, path, contents);
        let _ = lock.unlock();
        result
    }

    fn replace(dir: &Path, path: &Path, contents: &str) -> Result<()> {
        let temp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        self.read_locked(key, &path)
            .map(Some)
            .map_err(|e| Error::StorageRead(format!("{:?}: {}", path, e)))
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        self.write_atomic(key, &path, contents)
            .map_err(|e| Error::StorageWrite(format!("{:?}: {}", path, e)))?;

        tracing::debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Store that keeps blobs in memory, for tests and ephemeral shells
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `contents` under `key`
    pub fn with_blob(key: &str, contents: &str) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.blobs.lock() {
            blobs.insert(key.to_string(), contents.to_string());
        }
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| Error::StorageRead(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| Error::StorageWrite(e.to_string()))?;
        blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

// ============================================================================
// State load/save
// ============================================================================

/// Decode a state blob; missing fields take their defaults
pub fn decode_state(blob: &str) -> Result<AppState> {
    serde_json::from_str(blob).map_err(|e| Error::StorageRead(e.to_string()))
}

/// Load the state blob, falling back to defaults on any failure
pub fn load_state(store: &dyn BlobStore) -> AppState {
    let blob = match store.read(STATE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::info!("No saved state found, using default state");
            return AppState::default();
        }
        Err(e) => {
            tracing::warn!("Unable to read saved state: {}. Using defaults.", e);
            return AppState::default();
        }
    };

    match decode_state(&blob) {
        Ok(state) => {
            tracing::debug!(
                "Loaded state: {} days, {} weight samples",
                state.daily_data.len(),
                state.weight_data.len()
            );
            state
        }
        Err(e) => {
            tracing::warn!("Failed to parse saved state: {}. Using defaults.", e);
            AppState::default()
        }
    }
}

/// Serialize and write the whole state, replacing the previous blob
pub fn try_save_state(store: &dyn BlobStore, state: &AppState) -> Result<()> {
    // Compact JSON; the blob is never read by people
    let blob = serde_json::to_string(state)?;
    store.write(STATE_KEY, &blob)
}

/// Fire-and-forget save: failures are logged and otherwise ignored
pub fn save_state(store: &dyn BlobStore, state: &AppState) {
    if let Err(e) = try_save_state(store, state) {
        tracing::error!("Failed to save state: {}", e);
    }
}
