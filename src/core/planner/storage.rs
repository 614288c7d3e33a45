//! Plan persistence port and its implementations

use crate::core::error::StorageError;
use crate::core::models::PersistedPlan;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Read/write contract for the persisted plan
pub trait PlanStorage {
    /// Load the stored plan, `Ok(None)` if nothing has been stored
    ///
    /// # Errors
    /// Returns [`StorageError::Malformed`] if the stored data cannot be decoded,
    /// or another [`StorageError`] if the backend cannot be read
    fn load(&self) -> Result<Option<PersistedPlan>, StorageError>;

    /// Replace the stored plan
    ///
    /// # Errors
    /// Returns [`StorageError`] if the plan cannot be encoded or written
    fn save(&self, plan: &PersistedPlan) -> Result<(), StorageError>;
}

/// Stores the plan as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backed by `path`; the file is created on first save
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<PersistedPlan>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        decode(&content).map(Some)
    }

    fn save(&self, plan: &PersistedPlan) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json =
            serde_json::to_string_pretty(plan).map_err(|e| StorageError::Encode(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the encoded plan in memory and counts writes
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl InMemoryStorage {
    /// Create an empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `raw` as its encoded plan
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(Some(raw.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw encoded plan currently held
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.data.lock().ok().and_then(|data| data.clone())
    }
}

impl PlanStorage for InMemoryStorage {
    fn load(&self) -> Result<Option<PersistedPlan>, StorageError> {
        let data = self
            .data
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        data.as_deref().map(decode).transpose()
    }

    fn save(&self, plan: &PersistedPlan) -> Result<(), StorageError> {
        let json = serde_json::to_string(plan).map_err(|e| StorageError::Encode(e.to_string()))?;
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        *data = Some(json);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn decode(content: &str) -> Result<PersistedPlan, StorageError> {
    serde_json::from_str(content).map_err(|e| StorageError::Malformed(e.to_string()))
}
