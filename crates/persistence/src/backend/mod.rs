// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend selection.
//!
//! The backend is chosen once, at startup, from a [`StoreConfig`]. Nothing
//! downstream of [`open_store`] knows which backend it is talking to.
//!
//! - `Live` opens the `SQLite` document store (a file, or a private
//!   in-memory database when no path is given)
//! - `Simulated` opens the in-memory fake, seeded with demo data

pub mod sqlite;

use std::path::PathBuf;

use tracing::info;

use crate::error::PersistenceError;
use crate::memory::MemoryDocumentStore;
use crate::sqlite_store::SqliteDocumentStore;
use crate::store::DocumentStore;

/// Which document store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// The `SQLite` document store.
    #[default]
    Live,
    /// The in-memory fake with demo data.
    Simulated,
}

/// Store configuration resolved at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub mode: BackendMode,
    /// `SQLite` file. Ignored in simulated mode.
    pub database_path: Option<PathBuf>,
}

/// Opens the document store described by `config`.
///
/// # Errors
///
/// Returns an error if the `SQLite` database cannot be opened or migrated.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn DocumentStore>, PersistenceError> {
    let store: Box<dyn DocumentStore> = match (config.mode, &config.database_path) {
        (BackendMode::Simulated, _) => Box::new(MemoryDocumentStore::with_demo_data()),
        (BackendMode::Live, Some(path)) => Box::new(SqliteDocumentStore::new_with_file(path)?),
        (BackendMode::Live, None) => Box::new(SqliteDocumentStore::new_in_memory()?),
    };
    info!(backend = store.backend_name(), "Document store opened");
    Ok(store)
}
