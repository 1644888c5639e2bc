//! Manage agenda use case
//!
//! Admin CRUD over the order-of-business collection.

use super::shared::{delete_or_notify, fresh_id, persist_or_notify};
use crate::directory::SharedDirectory;
use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::document_store::{Collection, DocumentStore};
use crate::ports::identity::Session;
use crate::ports::status_notifier::{NoNotices, NoticeLevel, StatusNotifier};
use duma_domain::{AgendaDay, AgendaId, BusinessItem};
use std::sync::Arc;
use thiserror::Error;

/// Errors that reject the request before any state changes
#[derive(Error, Debug)]
pub enum ManageAgendaError {
    #[error("Admin session required")]
    NotAuthorized,

    #[error("Unknown agenda day: {0}")]
    UnknownAgenda(String),
}

/// Input for saving (creating or editing) an agenda day
#[derive(Debug, Clone)]
pub struct SaveAgendaInput {
    /// Existing id when editing; `None` mints a fresh one.
    pub id: Option<String>,
    pub date: String,
    pub business: Vec<BusinessItem>,
}

impl SaveAgendaInput {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            id: None,
            date: date.into(),
            business: Vec::new(),
        }
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_business(mut self, item: BusinessItem) -> Self {
        self.business.push(item);
        self
    }
}

/// Use case for admin agenda management
pub struct ManageAgendaUseCase<S: DocumentStore + 'static> {
    store: Arc<S>,
    directory: SharedDirectory,
    audit: Arc<dyn AuditLog>,
    notices: Arc<dyn StatusNotifier>,
}

impl<S: DocumentStore + 'static> ManageAgendaUseCase<S> {
    pub fn new(store: Arc<S>, directory: SharedDirectory) -> Self {
        Self {
            store,
            directory,
            audit: Arc::new(NoAuditLog),
            notices: Arc::new(NoNotices),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_notices(mut self, notices: Arc<dyn StatusNotifier>) -> Self {
        self.notices = notices;
        self
    }

    /// Create or replace an agenda day.
    pub async fn save(
        &self,
        session: &Session,
        input: SaveAgendaInput,
    ) -> Result<AgendaDay, ManageAgendaError> {
        if !session.can_write() {
            return Err(ManageAgendaError::NotAuthorized);
        }

        let (day, editing) = {
            let mut dir = self.directory.write().await;
            let (id, editing) = match input.id.as_deref().filter(|s| !s.is_empty()) {
                Some(id) => (id.to_string(), true),
                None => (fresh_id("agenda"), false),
            };
            let day = AgendaDay {
                id: AgendaId::from(id),
                date: input.date,
                business: input.business,
            };
            dir.upsert_agenda(day.clone());
            (day, editing)
        };

        self.notices.notify(
            NoticeLevel::Info,
            if editing { "Agenda updated." } else { "Agenda created." },
        );

        let persisted = persist_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Agenda,
            day.id.as_str(),
            &day,
        )
        .await;
        self.audit.record(AuditEvent::new(
            "agenda_saved",
            serde_json::json!({
                "id": day.id.as_str(),
                "date": day.date,
                "items": day.business.len(),
                "editing": editing,
                "persisted": persisted,
            }),
        ));
        Ok(day)
    }

    /// Delete an agenda day.
    pub async fn delete(&self, session: &Session, id: &str) -> Result<(), ManageAgendaError> {
        if !session.can_write() {
            return Err(ManageAgendaError::NotAuthorized);
        }

        {
            let mut dir = self.directory.write().await;
            if !dir.remove_agenda(id) {
                return Err(ManageAgendaError::UnknownAgenda(id.to_string()));
            }
        }
        self.notices.notify(NoticeLevel::Info, "Agenda removed.");

        let persisted = delete_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Agenda,
            id,
        )
        .await;
        self.audit.record(AuditEvent::new(
            "agenda_deleted",
            serde_json::json!({ "id": id, "persisted": persisted }),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use crate::use_cases::shared::testing::{admin_session, FakeStore};
    use duma_domain::RichText;

    #[tokio::test]
    async fn test_save_and_delete_agenda_day() {
        let store = Arc::new(FakeStore::new());
        let directory = Directory::new().into_shared();
        let use_case = ManageAgendaUseCase::new(store.clone(), directory.clone());

        let input = SaveAgendaInput::new("2025-03-04").with_business(BusinessItem {
            time: "10:00".to_string(),
            title: "Opening Session".to_string(),
            text: RichText::from("<b>Call to order</b>"),
            items: Vec::new(),
        });
        let day = use_case.save(&admin_session(), input).await.unwrap();
        assert!(day.id.as_str().starts_with("agenda-"));
        assert!(store.doc(Collection::Agenda, day.id.as_str()).is_some());

        use_case
            .delete(&admin_session(), day.id.as_str())
            .await
            .unwrap();
        assert!(directory.read().await.agenda.is_empty());
        assert!(store.doc(Collection::Agenda, day.id.as_str()).is_none());
    }

    #[tokio::test]
    async fn test_editing_replaces_business_in_place() {
        let store = Arc::new(FakeStore::new());
        let directory = Directory::new().into_shared();
        let use_case = ManageAgendaUseCase::new(store, directory.clone());

        let day = use_case
            .save(&admin_session(), SaveAgendaInput::new("2025-03-04"))
            .await
            .unwrap();
        let edited = use_case
            .save(
                &admin_session(),
                SaveAgendaInput::new("2025-03-05").editing(day.id.as_str()),
            )
            .await
            .unwrap();

        assert_eq!(edited.id, day.id);
        let dir = directory.read().await;
        assert_eq!(dir.agenda.len(), 1);
        assert_eq!(dir.agenda[0].date, "2025-03-05");
    }
}
