//! Helpers shared across use cases.

use crate::ports::audit_log::{AuditEvent, AuditLog};
use crate::ports::document_store::{Collection, DocumentStore, StoreError};
use crate::ports::status_notifier::{NoticeLevel, StatusNotifier};
use serde::Serialize;
use tracing::warn;

/// Notice text for a failed remote write after a successful local save.
pub const SAVE_FAILED_NOTICE: &str = "Saved locally but failed to persist to database.";

/// Notice text for a failed remote delete after a successful local delete.
pub const DELETE_FAILED_NOTICE: &str =
    "Local delete succeeded but failed to remove from database.";

/// Mint a fresh document id with the collection's conventional prefix.
pub(crate) fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", chrono::Utc::now().timestamp_millis())
}

/// Persist a document under the optimistic-always policy.
///
/// The caller has already applied the change to the local directory; that
/// change stands no matter what happens here. A failed write is reported
/// through the notifier and the audit log, never rolled back. Returns whether
/// the remote write went through.
pub(crate) async fn persist_or_notify<S, T>(
    store: &S,
    notices: &dyn StatusNotifier,
    audit: &dyn AuditLog,
    collection: Collection,
    id: &str,
    document: &T,
) -> bool
where
    S: DocumentStore + ?Sized,
    T: Serialize,
{
    let value = match serde_json::to_value(document) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not serialize {collection}/{id}: {e}");
            report_failure(notices, audit, collection, id, SAVE_FAILED_NOTICE, &e.to_string());
            return false;
        }
    };
    match store.put(collection, id, value).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist {collection}/{id}: {e}");
            report_failure(notices, audit, collection, id, SAVE_FAILED_NOTICE, &e.to_string());
            false
        }
    }
}

/// Remote-delete counterpart of [`persist_or_notify`].
pub(crate) async fn delete_or_notify<S>(
    store: &S,
    notices: &dyn StatusNotifier,
    audit: &dyn AuditLog,
    collection: Collection,
    id: &str,
) -> bool
where
    S: DocumentStore + ?Sized,
{
    match store.delete(collection, id).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to delete {collection}/{id}: {e}");
            report_failure(notices, audit, collection, id, DELETE_FAILED_NOTICE, &e.to_string());
            false
        }
    }
}

fn report_failure(
    notices: &dyn StatusNotifier,
    audit: &dyn AuditLog,
    collection: Collection,
    id: &str,
    notice: &str,
    error: &str,
) {
    notices.notify(NoticeLevel::Warning, notice);
    audit.record(AuditEvent::new(
        "persist_failed",
        serde_json::json!({
            "collection": collection.name(),
            "id": id,
            "error": error,
        }),
    ));
}

/// Swallow a [`StoreError`] that hydration can survive, logging it.
pub(crate) fn log_store_error(context: &str, error: &StoreError) {
    warn!("{context}: {error}");
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by use-case tests.

    use crate::ports::change_feed::{ChangeEvent, ChangeFeed, ChangeStream};
    use crate::ports::document_store::{Collection, DocumentStore, StoreError};
    use crate::ports::identity::{Session, SessionKind};
    use crate::ports::status_notifier::{NoticeLevel, StatusNotifier};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory store with switchable write failure.
    #[derive(Default)]
    pub struct FakeStore {
        docs: Mutex<BTreeMap<(&'static str, String), Value>>,
        pub fail_writes: AtomicBool,
    }

    impl FakeStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            let store = Self::default();
            store.fail_writes.store(true, Ordering::SeqCst);
            store
        }

        pub fn doc(&self, collection: Collection, id: &str) -> Option<Value> {
            self.docs
                .lock()
                .unwrap()
                .get(&(collection.name(), id.to_string()))
                .cloned()
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                Err(StoreError::Unavailable("injected failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn put(
            &self,
            collection: Collection,
            id: &str,
            document: Value,
        ) -> Result<(), StoreError> {
            self.check()?;
            self.docs
                .lock()
                .unwrap()
                .insert((collection.name(), id.to_string()), document);
            Ok(())
        }

        async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
            Ok(self.doc(collection, id))
        }

        async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
            self.check()?;
            self.docs
                .lock()
                .unwrap()
                .remove(&(collection.name(), id.to_string()));
            Ok(())
        }

        async fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError> {
            Ok(self
                .docs
                .lock()
                .unwrap()
                .iter()
                .filter(|((coll, _), _)| *coll == collection.name())
                .map(|((_, id), doc)| (id.clone(), doc.clone()))
                .collect())
        }
    }

    #[async_trait]
    impl ChangeFeed for FakeStore {
        async fn watch(&self, _collection: Collection) -> Result<ChangeStream, StoreError> {
            Ok(Box::pin(futures::stream::empty::<ChangeEvent>()))
        }
    }

    /// Notifier that records every notice for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notices: Mutex<Vec<(NoticeLevel, String)>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl StatusNotifier for RecordingNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notices
                .lock()
                .unwrap()
                .push((level, message.to_string()));
        }
    }

    pub fn admin_session() -> Session {
        Session {
            user_id: "admin".to_string(),
            kind: SessionKind::Admin,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn anonymous_session() -> Session {
        Session {
            user_id: "anon".to_string(),
            kind: SessionKind::Anonymous,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_carry_prefix() {
        let id = fresh_id("bill");
        assert!(id.starts_with("bill-"));
        assert!(id["bill-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
