//! Persistence of module books behind an explicit repository interface
//!
//! Books are stored as a JSON array of modules under an opaque key. Loading
//! never fails from the caller's point of view: missing or unreadable data
//! yields a fresh default book.

use crate::core::book::ModuleBook;
use crate::core::models::{Defaults, Module};
use crate::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Key under which the CLI keeps its book
pub const DEFAULT_STORE_KEY: &str = "cijfermeester_data";

/// Errors raised by module repositories
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Stored data could not be (de)serialized
    #[error("invalid module data: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A number is NaN or infinite; JSON would store it as `null`
    #[error("module '{module}' has a non-finite {field}")]
    NonFinite {
        /// Name of the offending module
        module: String,
        /// Field holding the value
        field: &'static str,
    },
}

/// Refuse modules whose numbers cannot round-trip through JSON
fn ensure_storable(modules: &[Module]) -> Result<(), StoreError> {
    for module in modules {
        if let Some(field) = module.non_finite_field() {
            return Err(StoreError::NonFinite {
                module: module.name.clone(),
                field,
            });
        }
    }
    Ok(())
}

/// Load and save module lists by key
pub trait ModuleRepository {
    /// Load the modules stored under `key`, `Ok(None)` when nothing is stored
    ///
    /// # Errors
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load(&self, key: &str) -> Result<Option<Vec<Module>>, StoreError>;

    /// Replace the modules stored under `key`
    ///
    /// # Errors
    /// Returns an error if the data cannot be serialized or written.
    fn save(&self, key: &str, modules: &[Module]) -> Result<(), StoreError>;
}

/// Repository keeping one pretty-printed JSON file per key in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir` (created lazily on first save)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ModuleRepository for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Module>>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded module data from {}", path.display());
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, key: &str, modules: &[Module]) -> Result<(), StoreError> {
        ensure_storable(modules)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, serde_json::to_string_pretty(modules)?)?;
        debug!("Saved {} module(s) to {}", modules.len(), path.display());
        Ok(())
    }
}

/// In-memory repository holding serialized blobs, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw blob under `key`, bypassing serialization
    pub fn insert_raw(&self, key: &str, blob: impl Into<String>) {
        self.blobs.borrow_mut().insert(key.to_string(), blob.into());
    }

    /// Raw blob stored under `key`
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl ModuleRepository for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Module>>, StoreError> {
        self.blobs
            .borrow()
            .get(key)
            .map(|blob| serde_json::from_str(blob))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, key: &str, modules: &[Module]) -> Result<(), StoreError> {
        ensure_storable(modules)?;
        let blob = serde_json::to_string(modules)?;
        self.blobs.borrow_mut().insert(key.to_string(), blob);
        Ok(())
    }
}

/// Load the book stored under `key`, falling back to a fresh default book
///
/// Missing data, unreadable data and empty lists all produce a book with one
/// default module. Failures are logged, never returned.
pub fn load_book<R: ModuleRepository + ?Sized>(
    repo: &R,
    key: &str,
    defaults: &Defaults,
) -> ModuleBook {
    match repo.load(key) {
        Ok(Some(modules)) if !modules.is_empty() => ModuleBook::new(modules),
        Ok(_) => {
            debug!("No stored modules under '{key}', starting with a default module");
            ModuleBook::with_default(defaults)
        }
        Err(e) => {
            warn!("Failed to load modules under '{key}': {e}");
            ModuleBook::with_default(defaults)
        }
    }
}

/// Save a book under `key`; an empty book is never written
///
/// # Errors
/// Returns an error if the repository fails to save.
pub fn save_book<R: ModuleRepository + ?Sized>(
    repo: &R,
    key: &str,
    book: &ModuleBook,
) -> Result<(), StoreError> {
    if book.is_empty() {
        debug!("Skipping save of empty module book under '{key}'");
        return Ok(());
    }
    repo.save(key, &book.modules)
}
