//! Port for the store's push-style change feed.
//!
//! The reading side of the system keeps a live local cache of every
//! collection; this port delivers the document-level changes that keep it
//! current. Delivery is at-least-once and carries the full document; the
//! cache applies events idempotently.

use super::document_store::{Collection, StoreError};
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

/// A single document-level change.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A document was created or replaced.
    Put {
        collection: Collection,
        id: String,
        document: Value,
    },
    /// A document was removed.
    Delete { collection: Collection, id: String },
}

impl ChangeEvent {
    pub fn collection(&self) -> Collection {
        match self {
            ChangeEvent::Put { collection, .. } | ChangeEvent::Delete { collection, .. } => {
                *collection
            }
        }
    }
}

/// Stream of changes for one collection.
pub type ChangeStream = BoxStream<'static, ChangeEvent>;

/// Port for subscribing to document changes.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Open a change stream for a collection.
    ///
    /// The stream ends when the subscription is torn down by the adapter;
    /// callers that need to stop early drop the stream.
    async fn watch(&self, collection: Collection) -> Result<ChangeStream, StoreError>;
}
