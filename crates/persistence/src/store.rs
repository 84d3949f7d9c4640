// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The document store abstraction.
//!
//! A document is a JSON object stored under a collection and an id. The id
//! is not part of the body.

use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::error::PersistenceError;

/// Length of generated document ids.
pub const DOCUMENT_ID_LENGTH: usize = 20;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A document as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

/// Read and write access to collections of JSON documents.
///
/// Implementations keep documents in insertion order within a collection.
pub trait DocumentStore: Send {
    /// Short name of the backend, for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Returns every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&mut self, collection: Collection) -> Result<Vec<StoredDocument>, PersistenceError>;

    /// Returns one document, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(
        &mut self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, PersistenceError>;

    /// Stores a new document under a generated id and returns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not an object or the write fails.
    fn insert(&mut self, collection: Collection, body: Value) -> Result<String, PersistenceError>;

    /// Stores a document at a caller-chosen id, replacing any existing body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not an object or the write fails.
    fn put(&mut self, collection: Collection, id: &str, body: Value)
    -> Result<(), PersistenceError>;

    /// Merges the top-level fields of `patch` into an existing document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DocumentNotFound` if the document does not
    /// exist, or an error if `patch` is not an object or the write fails.
    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<StoredDocument, PersistenceError>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DocumentNotFound` if the document does not
    /// exist, or an error if the write fails.
    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), PersistenceError>;
}

/// Generates a random alphanumeric document id.
#[must_use]
pub fn generate_document_id() -> String {
    (0..DOCUMENT_ID_LENGTH)
        .map(|_| {
            let index: usize = usize::from(rand::random::<u8>()) % ID_ALPHABET.len();
            char::from(ID_ALPHABET[index])
        })
        .collect()
}

/// Returns the body as an object map, or an error naming the collection.
pub(crate) fn expect_object(
    collection: Collection,
    body: Value,
) -> Result<Map<String, Value>, PersistenceError> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(PersistenceError::InvalidDocument {
            collection: collection.to_string(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Overwrites `target`'s top-level fields with those of `patch`.
pub(crate) fn merge_shallow(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

pub(crate) fn not_found(collection: Collection, id: &str) -> PersistenceError {
    PersistenceError::DocumentNotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}
