//! In-memory document store.
//!
//! Backs tests and offline runs. Implements both the store and its change
//! feed: every write fans out over a broadcast channel, so watchers see the
//! same document-level events the hosted backend would push.

use async_trait::async_trait;
use duma_application::ports::change_feed::{ChangeEvent, ChangeFeed, ChangeStream};
use duma_application::ports::document_store::{Collection, DocumentStore, StoreError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::warn;

/// In-memory, broadcast-backed document store.
pub struct MemoryDocumentStore {
    docs: RwLock<BTreeMap<(&'static str, String), Value>>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(256);
        Self {
            docs: RwLock::new(BTreeMap::new()),
            changes,
        }
    }

    fn publish(&self, event: ChangeEvent) {
        // no receivers is fine; events are only for live watchers
        let _ = self.changes.send(event);
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        self.docs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert((collection.name(), id.to_string()), document.clone());
        self.publish(ChangeEvent::Put {
            collection,
            id: id.to_string(),
            document,
        });
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .docs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(collection.name(), id.to_string()))
            .cloned())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let removed = self
            .docs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&(collection.name(), id.to_string()));
        if removed.is_some() {
            self.publish(ChangeEvent::Delete {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self
            .docs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|((coll, _), _)| *coll == collection.name())
            .map(|((_, id), doc)| (id.clone(), doc.clone()))
            .collect())
    }
}

#[async_trait]
impl ChangeFeed for MemoryDocumentStore {
    async fn watch(&self, collection: Collection) -> Result<ChangeStream, StoreError> {
        let rx = self.changes.subscribe();
        let stream = futures::stream::unfold(rx, move |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.collection() == collection => return Some((event, rx)),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Change feed lagged by {n} events");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });
        Ok(Box::pin(stream))
    }
}
