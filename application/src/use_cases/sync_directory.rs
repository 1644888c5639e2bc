//! Sync directory use case
//!
//! Hydrates the live directory from the store and keeps it current from the
//! change feed. The loop is cancellable; it owns no other shutdown logic.

use super::shared::log_store_error;
use crate::directory::SharedDirectory;
use crate::ports::change_feed::{ChangeEvent, ChangeFeed};
use crate::ports::document_store::{Collection, DocumentStore, StoreError};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors opening the feed or hydrating
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case keeping the local directory in step with the store
pub struct SyncDirectoryUseCase<S: DocumentStore + 'static, F: ChangeFeed + 'static> {
    store: Arc<S>,
    feed: Arc<F>,
    directory: SharedDirectory,
}

impl<S: DocumentStore + 'static, F: ChangeFeed + 'static> SyncDirectoryUseCase<S, F> {
    pub fn new(store: Arc<S>, feed: Arc<F>, directory: SharedDirectory) -> Self {
        Self {
            store,
            feed,
            directory,
        }
    }

    /// One-shot load of every collection into the directory.
    ///
    /// A collection that fails to list is logged and skipped; the reader
    /// still gets the collections that did load.
    pub async fn hydrate(&self) {
        for collection in Collection::ALL {
            let docs = match self.store.list(collection).await {
                Ok(docs) => docs,
                Err(e) => {
                    log_store_error("Hydration skipped a collection", &e);
                    continue;
                }
            };
            let mut dir = self.directory.write().await;
            for (id, document) in docs {
                dir.apply_change(&ChangeEvent::Put {
                    collection,
                    id,
                    document,
                });
            }
        }
        let dir = self.directory.read().await;
        info!(
            "Directory hydrated: {} bills, {} representatives, {} agenda days",
            dir.bills.len(),
            dir.representatives.len(),
            dir.agenda.len()
        );
    }

    /// Run the live-update loop until cancelled or the feed ends.
    ///
    /// Events are applied one at a time under the write lock; readers between
    /// events always see a complete (if possibly momentarily stale) mirror.
    /// That is the store's own last-writer-wins semantics, nothing stronger.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), SyncError> {
        let mut streams = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            streams.push(self.feed.watch(collection).await?);
        }
        let mut merged = futures::stream::select_all(streams);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Directory sync stopped");
                    return Ok(());
                }
                event = merged.next() => match event {
                    Some(event) => {
                        debug!("Applying change to {}", event.collection());
                        self.directory.write().await.apply_change(&event);
                    }
                    None => {
                        info!("Change feed ended");
                        return Ok(());
                    }
                }
            }
        }
    }
}
