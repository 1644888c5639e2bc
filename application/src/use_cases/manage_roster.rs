//! Manage roster use case
//!
//! Admin CRUD over the representatives collection, with the leadership
//! cascades the chamber's rules require: submitting a representative with a
//! leadership post assigns that post (superseding any previous holder and any
//! other post the member held), submitting without one clears every entry
//! referencing them, and deleting a representative removes their entry.

use super::shared::{delete_or_notify, fresh_id, persist_or_notify};
use crate::directory::SharedDirectory;
use crate::ports::audit_log::{AuditEvent, AuditLog, NoAuditLog};
use crate::ports::document_store::{Collection, DocumentStore};
use crate::ports::identity::Session;
use crate::ports::status_notifier::{NoNotices, NoticeLevel, StatusNotifier};
use duma_domain::{
    LeadershipEntry, LeadershipPost, Party, Region, Representative, RepresentativeId,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that reject the request before any state changes
#[derive(Error, Debug)]
pub enum ManageRosterError {
    #[error("Admin session required")]
    NotAuthorized,

    #[error("Unknown representative: {0}")]
    UnknownRepresentative(String),
}

/// Input for submitting (creating or editing) a representative
#[derive(Debug, Clone)]
pub struct SubmitRepresentativeInput {
    /// Existing id when editing; `None` mints a fresh one.
    pub id: Option<String>,
    pub name: String,
    pub party: Party,
    pub region: Region,
    pub image: Option<String>,
    /// Leadership post to hold; `None` clears any held post.
    pub leadership_role: Option<LeadershipPost>,
    /// Bio shown on the leadership page when a post is assigned.
    pub bio: String,
}

impl SubmitRepresentativeInput {
    pub fn new(name: impl Into<String>, party: Party, region: Region) -> Self {
        Self {
            id: None,
            name: name.into(),
            party,
            region,
            image: None,
            leadership_role: None,
            bio: String::new(),
        }
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_leadership_role(mut self, post: LeadershipPost) -> Self {
        self.leadership_role = Some(post);
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }
}

/// Use case for admin roster management
pub struct ManageRosterUseCase<S: DocumentStore + 'static> {
    store: Arc<S>,
    directory: SharedDirectory,
    audit: Arc<dyn AuditLog>,
    notices: Arc<dyn StatusNotifier>,
}

impl<S: DocumentStore + 'static> ManageRosterUseCase<S> {
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

    /// Create or replace a representative, cascading leadership changes.
    pub async fn submit(
        &self,
        session: &Session,
        input: SubmitRepresentativeInput,
    ) -> Result<Representative, ManageRosterError> {
        if !session.can_write() {
            return Err(ManageRosterError::NotAuthorized);
        }

        let (rep, editing, assigned, cleared) = {
            let mut dir = self.directory.write().await;

            let (id, editing) = match input.id.as_deref().filter(|s| !s.is_empty()) {
                Some(id) => (id.to_string(), true),
                None => (fresh_id("rep"), false),
            };

            let mut rep = Representative::new(id, input.name, input.party, input.region);
            rep.image = input.image;
            rep.leadership_role = input.leadership_role;
            dir.upsert_representative(rep.clone());

            // A member holds at most one post: clear any others first, then
            // assign or clear per the form.
            let mut cleared = dir.leadership.clear_for(&rep.id);
            let assigned = match input.leadership_role {
                Some(post) => {
                    cleared.retain(|&p| p != post);
                    let entry = LeadershipEntry::for_representative(&rep, post, input.bio);
                    dir.leadership.assign(post, entry.clone());
                    Some((post, entry))
                }
                None => None,
            };
            (rep, editing, assigned, cleared)
        };

        self.notices.notify(
            NoticeLevel::Info,
            if editing {
                "Representative updated successfully!"
            } else {
                "Representative added successfully!"
            },
        );

        let persisted = persist_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Representatives,
            rep.id.as_str(),
            &rep,
        )
        .await;

        if let Some((post, entry)) = &assigned {
            persist_or_notify(
                self.store.as_ref(),
                self.notices.as_ref(),
                self.audit.as_ref(),
                Collection::Leadership,
                post.key(),
                entry,
            )
            .await;
        }
        for post in &cleared {
            delete_or_notify(
                self.store.as_ref(),
                self.notices.as_ref(),
                self.audit.as_ref(),
                Collection::Leadership,
                post.key(),
            )
            .await;
        }

        self.audit.record(AuditEvent::new(
            "representative_saved",
            serde_json::json!({
                "id": rep.id.as_str(),
                "name": rep.name,
                "leadership": assigned.as_ref().map(|(post, _)| post.key()),
                "cleared_posts": cleared.iter().map(|p| p.key()).collect::<Vec<_>>(),
                "editing": editing,
                "persisted": persisted,
            }),
        ));
        Ok(rep)
    }

    /// Delete a representative, removing any leadership entry they held.
    pub async fn delete(&self, session: &Session, id: &str) -> Result<(), ManageRosterError> {
        if !session.can_write() {
            return Err(ManageRosterError::NotAuthorized);
        }

        let cleared = {
            let mut dir = self.directory.write().await;
            if !dir.remove_representative(id) {
                return Err(ManageRosterError::UnknownRepresentative(id.to_string()));
            }
            dir.leadership.clear_for(&RepresentativeId::from(id))
        };
        self.notices
            .notify(NoticeLevel::Info, "Representative deleted.");

        let persisted = delete_or_notify(
            self.store.as_ref(),
            self.notices.as_ref(),
            self.audit.as_ref(),
            Collection::Representatives,
            id,
        )
        .await;
        for post in &cleared {
            delete_or_notify(
                self.store.as_ref(),
                self.notices.as_ref(),
                self.audit.as_ref(),
                Collection::Leadership,
                post.key(),
            )
            .await;
        }

        self.audit.record(AuditEvent::new(
            "representative_deleted",
            serde_json::json!({
                "id": id,
                "cleared_posts": cleared.iter().map(|p| p.key()).collect::<Vec<_>>(),
                "persisted": persisted,
            }),
        ));
        Ok(())
    }
}
