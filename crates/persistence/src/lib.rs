// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Tourdesk.
//!
//! Data lives in collections of JSON documents, accessed through the
//! [`DocumentStore`] trait. Two implementations exist:
//!
//! - **`SQLite`** ([`SqliteDocumentStore`]): one `documents` table managed
//!   by Diesel with embedded migrations. Used in live mode and in tests
//!   that exercise real SQL.
//! - **In-memory** ([`MemoryDocumentStore`]): insertion-ordered maps,
//!   optionally seeded with demo data. Used in simulated mode.
//!
//! The backend is chosen once from a [`StoreConfig`] via [`open_store`].
//!
//! Typed access goes through the [`Record`] trait: [`fetch_all`],
//! [`fetch_one`], [`insert_record`] and [`replace_record`] convert between
//! documents and domain records, applying defaults and timestamp
//! normalization exactly once. Edits go through [`update_record`], which
//! merges only the fields a document patch sets.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::AtomicU64;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `SqliteDocumentStore::new_in_memory()` receives a unique
/// sequential id.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod collection;
mod diesel_schema;
mod documents;
mod error;
mod memory;
mod records;
mod sqlite_store;
mod store;

#[cfg(test)]
mod tests;

pub use backend::{BackendMode, StoreConfig, open_store};
pub use collection::Collection;
pub use error::PersistenceError;
pub use memory::MemoryDocumentStore;
pub use documents::{
    ActivityDocument, ActivityGuideDocument, ActivityTypeDocument, ActivityUsersDocument,
    CategoryDocument, GuideRequestDocument, LocationDocument, RegistrationDocument,
    TrackDocument, UserDocument,
};
pub use records::{
    DEFAULT_TRACK_MINUTES, Record, decode, encode, fetch_all, fetch_one, insert_record,
    replace_record, update_record,
};
pub use sqlite_store::SqliteDocumentStore;
pub use store::{DOCUMENT_ID_LENGTH, DocumentStore, StoredDocument, generate_document_id};
