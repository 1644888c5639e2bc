//! Port for the hosted document database.
//!
//! The store holds whole JSON documents keyed by `(collection, id)` within a
//! deployment (tenant) scope. Writes always replace the full document: the
//! backend offers no partial-patch semantics and this port does not pretend
//! otherwise. Concurrent writers are last-writer-wins per document.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The four collections this deployment stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bills,
    Representatives,
    Leadership,
    Agenda,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Bills,
        Collection::Representatives,
        Collection::Leadership,
        Collection::Agenda,
    ];

    /// Collection name as it appears in store paths.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Bills => "bills",
            Collection::Representatives => "representatives",
            Collection::Leadership => "leadership",
            Collection::Agenda => "agenda",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from the document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Malformed document in {collection}/{id}: {message}")]
    Malformed {
        collection: Collection,
        id: String,
        message: String,
    },
}

/// Port for whole-document storage.
///
/// Implementations live in the infrastructure layer (REST client, in-memory
/// store). All operations are scoped to the deployment the adapter was
/// constructed for.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write (or replace) a document.
    async fn put(&self, collection: Collection, id: &str, document: Value)
        -> Result<(), StoreError>;

    /// Fetch a document, `None` if absent.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError>;

    /// Delete a document. Deleting an absent document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// List every `(id, document)` pair in a collection.
    async fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError>;
}
