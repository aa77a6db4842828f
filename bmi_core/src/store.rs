//! History persistence.
//!
//! The history is a single JSON array stored under one key. Storage is
//! abstracted behind [`HistoryBackend`] so the store can sit on a file, an
//! in-memory slot, or anything else that holds a string.
//!
//! Read problems (missing, unreadable, corrupt) degrade to an empty history
//! and write problems are logged and swallowed: every mutation still returns
//! the updated in-memory list. Callers that care whether the last write hit
//! storage can ask [`HistoryStore::last_write_persisted`].

use crate::{Error, HistoryEntry, NewEntry, Result};
use chrono::Utc;
use fs2::FileExt;
use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Name of the storage slot holding the history
pub const STORAGE_KEY: &str = "bmi-history";

/// Key-value slot the history is read from and written to
pub trait HistoryBackend {
    /// Raw stored contents, or `None` if nothing has been stored
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored contents
    fn write(&mut self, contents: &str) -> Result<()>;
}

// ============================================================================
// File backend
// ============================================================================

/// Stores the history as one JSON file with file locking
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for the standard file name inside a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        let _ = file.unlock();
        read?;

        Ok(Some(contents))
    }

    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn write(&mut self, contents: &str) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let temp = NamedTempFile::new_in(&parent)?;

        // Lock covers this writer's own temp file only; load-then-write in
        // the store is not locked across processes
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote history to {:?}", self.path);
        Ok(())
    }
}

// ============================================================================
// Memory backend
// ============================================================================

/// In-process storage slot
///
/// Clones share the same slot, so a test can keep a handle and inspect or
/// tamper with what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with raw contents
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl HistoryBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

// ============================================================================
// Store
// ============================================================================

/// The history collection, newest first
pub struct HistoryStore<B: HistoryBackend> {
    backend: B,
    last_write_persisted: bool,
}

impl HistoryStore<FileBackend> {
    /// Store backed by `bmi-history.json` inside `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        Self::new(FileBackend::in_dir(data_dir))
    }
}

impl<B: HistoryBackend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            last_write_persisted: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the persisted history
    ///
    /// Returns an empty list if nothing is stored or the stored data is not
    /// a JSON array. Elements that fail to parse, or whose bmi/category do
    /// not match their own weight and height, are skipped.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.backend.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored history, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Unable to read history: {}. Using empty history.", e);
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!("Stored history is not an array. Using empty history.");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to parse stored history: {}. Using empty history.", e);
                return Vec::new();
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<HistoryEntry>(item) {
                Ok(entry) if entry.is_consistent() => entries.push(entry),
                Ok(entry) => {
                    tracing::warn!(
                        "Skipping history entry {} with inconsistent bmi/category",
                        entry.id
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to parse history entry at index {}: {}", index, e);
                }
            }
        }

        tracing::debug!("Loaded {} history entries", entries.len());
        entries
    }

    /// Save a new entry at the front of the history
    pub fn add(&mut self, entry: NewEntry) -> Vec<HistoryEntry> {
        let entry = entry.into_entry(Uuid::new_v4().to_string(), Utc::now());
        tracing::info!("Saving history entry {} (BMI {:.1})", entry.id, entry.bmi);

        let mut entries = self.load();
        entries.insert(0, entry);
        self.persist(&entries);
        entries
    }

    /// Remove the entry with this id; unknown ids leave the history as is
    pub fn remove(&mut self, id: &str) -> Vec<HistoryEntry> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            tracing::debug!("No history entry with id {}", id);
        } else {
            tracing::info!("Removed history entry {}", id);
        }

        self.persist(&entries);
        entries
    }

    /// Delete every entry
    pub fn clear_all(&mut self) -> Vec<HistoryEntry> {
        tracing::info!("Clearing history");
        self.persist(&[]);
        Vec::new()
    }

    /// Whether the most recent add/remove/clear reached storage
    pub fn last_write_persisted(&self) -> bool {
        self.last_write_persisted
    }

    fn persist(&mut self, entries: &[HistoryEntry]) {
        let result = serde_json::to_string(entries)
            .map_err(Error::from)
            .and_then(|contents| self.backend.write(&contents));

        self.last_write_persisted = match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist history: {}. Keeping in-memory result.", e);
                false
            }
        };
    }
}
