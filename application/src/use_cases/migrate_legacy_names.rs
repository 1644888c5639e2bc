//! Legacy-name migration use case
//!
//! Older deployments stored vote membership and leadership back-references as
//! display-name strings, which break under renames and case or honorific
//! variation. This one-shot migration rewrites them to stable-id form:
//! each stored name resolves against the current roster by normalized match
//! (honorific stripped, case-insensitive); names that match nobody stay
//! preserved as unlisted voters and are reported, never dropped.
//!
//! Unlike the admin CRUD paths, migration is not optimistic: a failed write
//! aborts the run so it can be re-run cleanly.

use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::document_store::{Collection, DocumentStore, StoreError};
use crate::ports::identity::Session;
use duma_domain::rollcall::from_name_lists;
use duma_domain::{Representative, RollCall, Roster, Voter};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors during migration
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Admin session required")]
    NotAuthorized,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// What a migration run changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub bills_rewritten: usize,
    pub leadership_relinked: usize,
    /// Names that matched no roster member, preserved as unlisted.
    pub unmatched_names: Vec<String>,
}

/// A legacy vote block: four arrays of plain display names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyVote {
    ayes: Vec<String>,
    nays: Vec<String>,
    abstain: Vec<String>,
    absent: Vec<String>,
}

/// Use case rewriting name-keyed documents to id-keyed form
pub struct MigrateLegacyNamesUseCase<S: DocumentStore + 'static> {
    store: Arc<S>,
    audit: Arc<dyn AuditLog>,
}

impl<S: DocumentStore + 'static> MigrateLegacyNamesUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            audit: Arc::new(NoAuditLog),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub async fn execute(&self, session: &Session) -> Result<MigrationReport, MigrationError> {
        if !session.can_write() {
            return Err(MigrationError::NotAuthorized);
        }

        let roster = self.load_roster().await?;
        let mut report = MigrationReport::default();

        self.migrate_bills(&roster, &mut report).await?;
        self.migrate_leadership(&roster, &mut report).await?;

        report.unmatched_names.sort();
        report.unmatched_names.dedup();

        info!(
            "Migration complete: {} bills rewritten, {} leadership entries relinked, {} unmatched names",
            report.bills_rewritten,
            report.leadership_relinked,
            report.unmatched_names.len()
        );
        self.audit.record(AuditEvent::new(
            "legacy_names_migrated",
            serde_json::json!({
                "bills": report.bills_rewritten,
                "leadership": report.leadership_relinked,
                "unmatched": report.unmatched_names,
            }),
        ));
        Ok(report)
    }

    async fn load_roster(&self) -> Result<Roster, MigrationError> {
        let docs = self.store.list(Collection::Representatives).await?;
        let mut members = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            match serde_json::from_value::<Representative>(doc) {
                Ok(rep) => members.push(rep),
                Err(e) => warn!("Skipping malformed representative {id}: {e}"),
            }
        }
        Ok(Roster::new(members))
    }

    async fn migrate_bills(
        &self,
        roster: &Roster,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        for (id, mut doc) in self.store.list(Collection::Bills).await? {
            if !doc.is_object() {
                warn!("Skipping non-object bill document {id}");
                continue;
            }
            let Some(vote) = doc.get("vote") else {
                continue;
            };
            if !is_legacy_vote(vote) {
                continue;
            }
            let legacy: LegacyVote = match serde_json::from_value(vote.clone()) {
                Ok(legacy) => legacy,
                Err(e) => {
                    warn!("Skipping unreadable legacy vote on {id}: {e}");
                    continue;
                }
            };
            let record = from_name_lists(
                roster,
                &legacy.ayes,
                &legacy.nays,
                &legacy.abstain,
                &legacy.absent,
            );
            collect_unmatched(&record, &mut report.unmatched_names);

            match serde_json::to_value(&record) {
                Ok(value) => doc["vote"] = value,
                Err(e) => {
                    warn!("Skipping unserializable vote on {id}: {e}");
                    continue;
                }
            }
            self.store.put(Collection::Bills, &id, doc).await?;
            report.bills_rewritten += 1;
        }
        Ok(())
    }

    async fn migrate_leadership(
        &self,
        roster: &Roster,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        for (key, mut doc) in self.store.list(Collection::Leadership).await? {
            if !doc.is_object() || doc.get("repId").is_some_and(|v| !v.is_null()) {
                continue;
            }
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if name.trim().is_empty() {
                warn!("Leadership entry {key} has no holder name to resolve");
                continue;
            }
            match roster.resolve_name(&name) {
                Some(rep) => {
                    doc["repId"] = Value::String(rep.id.as_str().to_string());
                    self.store.put(Collection::Leadership, &key, doc).await?;
                    report.leadership_relinked += 1;
                }
                None => {
                    warn!("Leadership entry {key} names '{name}', who is not on the roster");
                    report.unmatched_names.push(name);
                }
            }
        }
        Ok(())
    }
}

/// Whether a stored vote block is in the legacy plain-string format.
fn is_legacy_vote(vote: &Value) -> bool {
    ["ayes", "nays", "abstain", "absent"].iter().any(|key| {
        vote.get(key)
            .and_then(Value::as_array)
            .is_some_and(|arr| arr.iter().any(Value::is_string))
    })
}

fn collect_unmatched(record: &RollCall, unmatched: &mut Vec<String>) {
    let categories = [
        record.ayes.as_slice(),
        record.nays.as_slice(),
        record.abstain.as_slice(),
        record.recorded_absent.as_deref().unwrap_or(&[]),
    ];
    for voter in categories.into_iter().flatten() {
        if let Voter::Unlisted(name) = voter {
            if !name.trim().is_empty() {
                unmatched.push(name.clone());
            }
        }
    }
}
