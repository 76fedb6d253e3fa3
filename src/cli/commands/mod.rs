//! CLI command handlers for `CijferMeester`.
//!
//! Each command is implemented in its own submodule. Commands that edit
//! modules load the book from the store, apply one edit and save it again.

pub mod config;
pub mod course;
pub mod module;
pub mod report;
pub mod stats;

use cijfermeester::book::{EditError, ModuleBook};
use cijfermeester::config::Config;
use cijfermeester::error;
use cijfermeester::models::Defaults;
use cijfermeester::store::{load_book, save_book, JsonFileStore};

/// Where the module book lives for this run
pub struct Workspace {
    store: JsonFileStore,
    key: String,
    defaults: Defaults,
}

impl Workspace {
    /// Build the workspace from the effective configuration
    pub fn from_config(config: &Config, key: &str) -> Self {
        Self {
            store: JsonFileStore::new(&config.paths.data_dir),
            key: key.to_string(),
            defaults: config.model_defaults(),
        }
    }

    /// Defaults for newly created modules and courses
    pub const fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Load the book; never fails
    pub fn load(&self) -> ModuleBook {
        load_book(&self.store, &self.key, &self.defaults)
    }

    /// Save the book, exiting on failure
    pub fn save(&self, book: &ModuleBook) {
        if let Err(e) = save_book(&self.store, &self.key, book) {
            fail(&format!(
                "Failed to save modules to {}: {e}",
                self.store.path_for(&self.key).display()
            ));
        }
    }

    /// Load, edit, save
    ///
    /// Exits with a failure message when the edit is refused; the stored data
    /// is left untouched in that case.
    pub fn edit<T>(&self, f: impl FnOnce(&mut ModuleBook) -> Result<T, EditError>) -> T {
        let mut book = self.load();
        match f(&mut book) {
            Ok(value) => {
                self.save(&book);
                value
            }
            Err(e) => fail(&e.to_string()),
        }
    }
}

/// Report a failed command and exit
pub fn fail(message: &str) -> ! {
    error!("{message}");
    eprintln!("✗ {message}");
    std::process::exit(1);
}
