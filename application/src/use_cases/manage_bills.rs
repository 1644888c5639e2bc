//! Manage bills use case
//!
//! Admin CRUD over the bills collection. Submission covers both creation and
//! editing: an input without an id mints a fresh `bill-<millis>` id, an input
//! with one replaces the stored document wholesale.

use super::shared::{delete_or_notify, fresh_id, persist_or_notify};
use crate::directory::SharedDirectory;
use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::document_store::{Collection, DocumentStore};
use crate::ports::identity::Session;
use crate::ports::status_notifier::{NoNotices, NoticeLevel, StatusNotifier};
use duma_domain::rollcall::{apply_text, RawBallotText, RollCall};
use duma_domain::{Bill, BillId, BillStatus};
use std::sync::Arc;
use thiserror::Error;

/// Errors that reject the request before any state changes
#[derive(Error, Debug)]
pub enum ManageBillsError {
    #[error("Admin session required")]
    NotAuthorized,

    #[error("Unknown bill: {0}")]
    UnknownBill(String),
}

/// Input for submitting (creating or editing) a bill
#[derive(Debug, Clone)]
pub struct SubmitBillInput {
    /// Existing id when editing; `None` mints a fresh one.
    pub id: Option<String>,
    pub title: String,
    pub status: BillStatus,
    pub kind: String,
    pub date: String,
    pub latest_action: String,
    pub sponsor: String,
    pub document_link: Option<String>,
    /// Bulk vote text; empty fields keep the existing record's entries.
    pub ballot_text: RawBallotText,
}

impl SubmitBillInput {
    pub fn new(
        title: impl Into<String>,
        status: BillStatus,
        kind: impl Into<String>,
        date: impl Into<String>,
        sponsor: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            status,
            kind: kind.into(),
            date: date.into(),
            latest_action: String::new(),
            sponsor: sponsor.into(),
            document_link: None,
            ballot_text: RawBallotText::default(),
        }
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_latest_action(mut self, action: impl Into<String>) -> Self {
        self.latest_action = action.into();
        self
    }

    pub fn with_document_link(mut self, url: impl Into<String>) -> Self {
        self.document_link = Some(url.into());
        self
    }

    pub fn with_ballot_text(mut self, text: RawBallotText) -> Self {
        self.ballot_text = text;
        self
    }
}

/// Use case for admin bill management
pub struct ManageBillsUseCase<S: DocumentStore + 'static> {
    store: Arc<S>,
    directory: SharedDirectory,
    audit: Arc<dyn AuditLog>,
    notices: Arc<dyn StatusNotifier>,
}

impl<S: DocumentStore + 'static> ManageBillsUseCase<S> {
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

    /// Create or replace a bill.
    pub async fn submit(
        &self,
        session: &Session,
        input: SubmitBillInput,
    ) -> Result<Bill, ManageBillsError> {
        if !session.can_write() {
            return Err(ManageBillsError::NotAuthorized);
        }

        let (bill, editing) = {
            let mut dir = self.directory.write().await;
            let roster = dir.roster();

            let (id, existing_vote, editing) = match input.id.as_deref().filter(|s| !s.is_empty()) {
                Some(id) => {
                    let existing = dir.bill(id).map(|b| b.vote.clone());
                    (id.to_string(), existing.unwrap_or_default(), true)
                }
                None => (fresh_id("bill"), RollCall::default(), false),
            };
            let vote = apply_text(&roster, &existing_vote, &input.ballot_text);

            let bill = Bill {
                id: BillId::from(id),
                title: input.title,
                status: input.status,
                kind: input.kind,
                date: input.date,
                latest_action: input.latest_action,
                sponsor: input.sponsor,
                document_link: input.document_link,
                vote,
            };
            dir.upsert_bill(bill.clone());
            (bill, editing)
        };

        self.notices.notify(
            NoticeLevel::Info,
            if editing {
                "Bill updated successfully!"
            } else {
                "Bill added successfully!"
            },
        );

        let persisted = persist_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Bills,
            bill.id.as_str(),
            &bill,
        )
        .await;
        self.audit.record(AuditEvent::new(
            "bill_saved",
            serde_json::json!({
                "id": bill.id.as_str(),
                "title": bill.title,
                "status": bill.status.label(),
                "editing": editing,
                "persisted": persisted,
            }),
        ));
        Ok(bill)
    }

    /// Delete a bill.
    pub async fn delete(&self, session: &Session, id: &str) -> Result<(), ManageBillsError> {
        if !session.can_write() {
            return Err(ManageBillsError::NotAuthorized);
        }

        {
            let mut dir = self.directory.write().await;
            if !dir.remove_bill(id) {
                return Err(ManageBillsError::UnknownBill(id.to_string()));
            }
        }
        self.notices.notify(NoticeLevel::Info, "Bill deleted.");

        let persisted = delete_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Bills,
            id,
        )
        .await;
        self.audit.record(AuditEvent::new(
            "bill_deleted",
            serde_json::json!({ "id": id, "persisted": persisted }),
        ));
        Ok(())
    }
}
