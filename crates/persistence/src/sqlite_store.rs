// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use diesel::SqliteConnection;
use diesel::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::DB_COUNTER;
use crate::backend;
use crate::collection::Collection;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;
use crate::store::{
    DocumentStore, StoredDocument, expect_object, generate_document_id, merge_shallow, not_found,
};

/// Diesel Queryable struct for document rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = documents)]
struct DocumentRow {
    document_id: String,
    body: String,
}

impl DocumentRow {
    fn into_stored(self) -> Result<StoredDocument, PersistenceError> {
        Ok(StoredDocument {
            body: serde_json::from_str(&self.body)?,
            id: self.document_id,
        })
    }
}

/// Document store backed by a single `SQLite` table.
pub struct SqliteDocumentStore {
    conn: SqliteConnection,
}

impl SqliteDocumentStore {
    /// Creates a store over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so stores created
    /// in the same process never see each other's documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let shared_memory_url = format!("file:tourdesk_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a store over a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    fn find_row(
        &mut self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<DocumentRow>, PersistenceError> {
        Ok(documents::table
            .filter(documents::collection.eq(collection.as_str()))
            .filter(documents::document_id.eq(id))
            .select(DocumentRow::as_select())
            .first(&mut self.conn)
            .optional()?)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn list(&mut self, collection: Collection) -> Result<Vec<StoredDocument>, PersistenceError> {
        debug!(%collection, "Listing documents");

        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::collection.eq(collection.as_str()))
            .order(documents::seq.asc())
            .select(DocumentRow::as_select())
            .load(&mut self.conn)?;

        rows.into_iter().map(DocumentRow::into_stored).collect()
    }

    fn get(
        &mut self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, PersistenceError> {
        debug!(%collection, id, "Fetching document");
        self.find_row(collection, id)?
            .map(DocumentRow::into_stored)
            .transpose()
    }

    fn insert(&mut self, collection: Collection, body: Value) -> Result<String, PersistenceError> {
        let body: String = serde_json::to_string(&expect_object(collection, body)?)?;
        let id: String = generate_document_id();

        diesel::insert_into(documents::table)
            .values((
                documents::collection.eq(collection.as_str()),
                documents::document_id.eq(&id),
                documents::body.eq(&body),
            ))
            .execute(&mut self.conn)?;

        debug!(%collection, id, "Inserted document");
        Ok(id)
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        body: Value,
    ) -> Result<(), PersistenceError> {
        let body: String = serde_json::to_string(&expect_object(collection, body)?)?;

        diesel::insert_into(documents::table)
            .values((
                documents::collection.eq(collection.as_str()),
                documents::document_id.eq(id),
                documents::body.eq(&body),
            ))
            .on_conflict((documents::collection, documents::document_id))
            .do_update()
            .set((
                documents::body.eq(&body),
                documents::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                    "CURRENT_TIMESTAMP",
                )),
            ))
            .execute(&mut self.conn)?;

        debug!(%collection, id, "Stored document");
        Ok(())
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<StoredDocument, PersistenceError> {
        let patch = expect_object(collection, patch)?;

        self.conn.transaction(|conn| {
            let row: Option<DocumentRow> = documents::table
                .filter(documents::collection.eq(collection.as_str()))
                .filter(documents::document_id.eq(id))
                .select(DocumentRow::as_select())
                .first(conn)
                .optional()?;
            let Some(row) = row else {
                return Err(not_found(collection, id));
            };

            let mut body = expect_object(collection, serde_json::from_str(&row.body)?)?;
            merge_shallow(&mut body, patch);
            let serialized: String = serde_json::to_string(&body)?;

            diesel::update(documents::table)
                .filter(documents::collection.eq(collection.as_str()))
                .filter(documents::document_id.eq(id))
                .set((
                    documents::body.eq(&serialized),
                    documents::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                        "CURRENT_TIMESTAMP",
                    )),
                ))
                .execute(conn)?;

            debug!(%collection, id, "Updated document");
            Ok(StoredDocument {
                id: id.to_string(),
                body: Value::Object(body),
            })
        })
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<(), PersistenceError> {
        let deleted: usize = diesel::delete(
            documents::table
                .filter(documents::collection.eq(collection.as_str()))
                .filter(documents::document_id.eq(id)),
        )
        .execute(&mut self.conn)?;

        if deleted == 0 {
            return Err(not_found(collection, id));
        }
        debug!(%collection, id, "Deleted document");
        Ok(())
    }
}
