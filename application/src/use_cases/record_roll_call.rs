//! Record roll-call use case
//!
//! Applies toggle or bulk-text vote input to a bill's roll-call against the
//! current roster snapshot, updates the live directory, and persists the
//! bill optimistically.

use super::shared::persist_or_notify;
use crate::directory::SharedDirectory;
use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::document_store::{Collection, DocumentStore};
use crate::ports::identity::Session;
use crate::ports::status_notifier::{NoNotices, StatusNotifier};
use duma_domain::rollcall::{apply_text, summarize, toggle, BallotChoice, RawBallotText, Tally};
use duma_domain::Bill;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that reject the request before any state changes
#[derive(Error, Debug)]
pub enum RollCallError {
    #[error("Admin session required")]
    NotAuthorized,

    #[error("Unknown bill: {0}")]
    UnknownBill(String),
}

/// Use case for recording roll-call votes on a bill
pub struct RecordRollCallUseCase<S: DocumentStore + 'static> {
    store: Arc<S>,
    directory: SharedDirectory,
    audit: Arc<dyn AuditLog>,
    notices: Arc<dyn StatusNotifier>,
}

impl<S: DocumentStore + 'static> RecordRollCallUseCase<S> {
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

    /// Toggle one voter's membership in an explicit category.
    pub async fn toggle(
        &self,
        session: &Session,
        bill_id: &str,
        voter: &str,
        choice: BallotChoice,
    ) -> Result<Tally, RollCallError> {
        if !session.can_write() {
            return Err(RollCallError::NotAuthorized);
        }

        let (snapshot, tally) = {
            let mut dir = self.directory.write().await;
            let roster = dir.roster();
            let bill = dir
                .bill_mut(bill_id)
                .ok_or_else(|| RollCallError::UnknownBill(bill_id.to_string()))?;
            bill.vote = toggle(&roster, &bill.vote, voter, choice);
            let tally = summarize(&bill.vote, &roster);
            (bill.clone(), tally)
        };

        debug!("Toggled {voter} -> {choice} on {bill_id}: {tally}");
        let persisted = self.persist(&snapshot).await;
        self.audit.record(AuditEvent::new(
            "vote_toggled",
            serde_json::json!({
                "bill": bill_id,
                "voter": voter,
                "choice": choice.label(),
                "summary": tally.summary(),
                "persisted": persisted,
            }),
        ));
        Ok(tally)
    }

    /// Apply bulk comma-separated vote text over the existing record.
    pub async fn submit_text(
        &self,
        session: &Session,
        bill_id: &str,
        raw: &RawBallotText,
    ) -> Result<Tally, RollCallError> {
        if !session.can_write() {
            return Err(RollCallError::NotAuthorized);
        }

        let (snapshot, tally) = {
            let mut dir = self.directory.write().await;
            let roster = dir.roster();
            let bill = dir
                .bill_mut(bill_id)
                .ok_or_else(|| RollCallError::UnknownBill(bill_id.to_string()))?;
            bill.vote = apply_text(&roster, &bill.vote, raw);
            let tally = summarize(&bill.vote, &roster);
            (bill.clone(), tally)
        };

        let persisted = self.persist(&snapshot).await;
        self.audit.record(AuditEvent::new(
            "vote_text_applied",
            serde_json::json!({
                "bill": bill_id,
                "summary": tally.summary(),
                "persisted": persisted,
            }),
        ));
        Ok(tally)
    }

    async fn persist(&self, bill: &Bill) -> bool {
        persist_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Bills,
            bill.id.as_str(),
            bill,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use crate::ports::status_notifier::NoticeLevel;
    use crate::use_cases::shared::testing::{admin_session, anonymous_session, FakeStore, RecordingNotifier};
    use crate::use_cases::shared::SAVE_FAILED_NOTICE;
    use duma_domain::{BillStatus, Party, Region, Representative};

    fn directory_with_bill() -> SharedDirectory {
        let mut dir = Directory::new();
        dir.upsert_representative(Representative::new(
            "rep-1", "Ivanov", Party::UnitedRussia, Region::Caucasia,
        ));
        dir.upsert_representative(Representative::new(
            "rep-2", "Petrov", Party::Independent, Region::VolgaValley,
        ));
        dir.upsert_representative(Representative::new(
            "rep-3", "Smirnova", Party::RussiaOfTheFuture, Region::CentralSteppes,
        ));
        dir.upsert_bill(Bill::new(
            "bill-1", "Budget Amendment", BillStatus::InDebate, "Finance", "2025-01-01", "Ivanov",
        ));
        dir.into_shared()
    }

    #[tokio::test]
    async fn test_toggle_updates_directory_and_store() {
        let store = Arc::new(FakeStore::new());
        let directory = directory_with_bill();
        let use_case = RecordRollCallUseCase::new(store.clone(), directory.clone());

        let tally = use_case
            .toggle(&admin_session(), "bill-1", "Petrov", BallotChoice::Aye)
            .await
            .unwrap();
        assert_eq!(tally.summary(), "AYE: 1, ABSENT: 2");

        let dir = directory.read().await;
        assert_eq!(dir.bill("bill-1").unwrap().vote.ayes.len(), 1);
        let doc = store.doc(Collection::Bills, "bill-1").unwrap();
        assert_eq!(doc["vote"]["ayes"][0]["value"], "rep-2");
    }

    #[tokio::test]
    async fn test_write_failure_keeps_local_state_and_notifies() {
        let store = Arc::new(FakeStore::failing());
        let directory = directory_with_bill();
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = RecordRollCallUseCase::new(store.clone(), directory.clone())
            .with_notices(notifier.clone());

        let tally = use_case
            .toggle(&admin_session(), "bill-1", "Ivanov", BallotChoice::Nay)
            .await
            .unwrap();
        assert_eq!(tally.nays, 1);

        // local state stands; no rollback
        let dir = directory.read().await;
        assert_eq!(dir.bill("bill-1").unwrap().vote.nays.len(), 1);
        // nothing reached the store
        assert!(store.doc(Collection::Bills, "bill-1").is_none());
        // and the failure was reported as a warning notice
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, NoticeLevel::Warning);
        assert_eq!(notices[0].1, SAVE_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_anonymous_session_is_rejected() {
        let store = Arc::new(FakeStore::new());
        let directory = directory_with_bill();
        let use_case = RecordRollCallUseCase::new(store, directory.clone());

        let err = use_case
            .toggle(&anonymous_session(), "bill-1", "Ivanov", BallotChoice::Aye)
            .await
            .unwrap_err();
        assert!(matches!(err, RollCallError::NotAuthorized));
        // nothing changed locally either
        let dir = directory.read().await;
        assert!(dir.bill("bill-1").unwrap().vote.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_bill_is_rejected() {
        let store = Arc::new(FakeStore::new());
        let use_case = RecordRollCallUseCase::new(store, directory_with_bill());
        let err = use_case
            .toggle(&admin_session(), "bill-404", "Ivanov", BallotChoice::Aye)
            .await
            .unwrap_err();
        assert!(matches!(err, RollCallError::UnknownBill(_)));
    }

    #[tokio::test]
    async fn test_submit_text_reconciles_against_roster() {
        let store = Arc::new(FakeStore::new());
        let directory = directory_with_bill();
        let use_case = RecordRollCallUseCase::new(store, directory.clone());

        let raw = RawBallotText::new().with_ayes("Rep. Ivanov, Petrov");
        let tally = use_case
            .submit_text(&admin_session(), "bill-1", &raw)
            .await
            .unwrap();
        assert_eq!(tally.summary(), "AYE: 2, ABSENT: 1");

        let dir = directory.read().await;
        let roster = dir.roster();
        let bill = dir.bill("bill-1").unwrap();
        assert_eq!(bill.vote.absent_display_names(&roster), vec!["Smirnova"]);
    }
}
