//! The live local cache of chamber data.
//!
//! A [`Directory`] mirrors the four store collections in memory. It is
//! hydrated once at startup and then kept current by applying change-feed
//! events; readers and use cases share it behind a `tokio::sync::RwLock`.
//!
//! Consistency model: eventually consistent, last-writer-wins per document,
//! exactly what the store provides. The directory adds no coordination of
//! its own.

use crate::ports::change_feed::ChangeEvent;
use crate::ports::document_store::Collection;
use duma_domain::{AgendaDay, Bill, LeadershipBoard, LeadershipPost, Representative, Roster};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Shared handle to the live directory.
pub type SharedDirectory = Arc<RwLock<Directory>>;

/// In-memory mirror of the store's collections.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    pub bills: Vec<Bill>,
    pub representatives: Vec<Representative>,
    pub leadership: LeadershipBoard,
    pub agenda: Vec<AgendaDay>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedDirectory {
        Arc::new(RwLock::new(self))
    }

    /// Roster snapshot for reconciliation.
    pub fn roster(&self) -> Roster {
        Roster::new(self.representatives.clone())
    }

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id.as_str() == id)
    }

    pub fn bill_mut(&mut self, id: &str) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|b| b.id.as_str() == id)
    }

    pub fn representative(&self, id: &str) -> Option<&Representative> {
        self.representatives.iter().find(|r| r.id.as_str() == id)
    }

    /// Upsert a bill, keeping list order stable on replace.
    pub fn upsert_bill(&mut self, bill: Bill) {
        match self.bill_mut(bill.id.as_str()) {
            Some(slot) => *slot = bill,
            None => self.bills.push(bill),
        }
    }

    pub fn remove_bill(&mut self, id: &str) -> bool {
        let before = self.bills.len();
        self.bills.retain(|b| b.id.as_str() != id);
        self.bills.len() != before
    }

    pub fn upsert_representative(&mut self, rep: Representative) {
        match self
            .representatives
            .iter_mut()
            .find(|r| r.id == rep.id)
        {
            Some(slot) => *slot = rep,
            None => self.representatives.push(rep),
        }
    }

    pub fn remove_representative(&mut self, id: &str) -> bool {
        let before = self.representatives.len();
        self.representatives.retain(|r| r.id.as_str() != id);
        self.representatives.len() != before
    }

    pub fn upsert_agenda(&mut self, day: AgendaDay) {
        match self.agenda.iter_mut().find(|a| a.id == day.id) {
            Some(slot) => *slot = day,
            None => self.agenda.push(day),
        }
    }

    pub fn remove_agenda(&mut self, id: &str) -> bool {
        let before = self.agenda.len();
        self.agenda.retain(|a| a.id.as_str() != id);
        self.agenda.len() != before
    }

    /// Apply one change-feed event.
    ///
    /// Unparseable documents are logged and skipped; a bad document in the
    /// store must not wedge the feed.
    pub fn apply_change(&mut self, event: &ChangeEvent) {
        match event {
            ChangeEvent::Put {
                collection,
                id,
                document,
            } => self.apply_put(*collection, id, document),
            ChangeEvent::Delete { collection, id } => match collection {
                Collection::Bills => {
                    self.remove_bill(id);
                }
                Collection::Representatives => {
                    self.remove_representative(id);
                }
                Collection::Leadership => {
                    if let Ok(post) = id.parse::<LeadershipPost>() {
                        self.leadership.clear_post(post);
                    }
                }
                Collection::Agenda => {
                    self.remove_agenda(id);
                }
            },
        }
    }

    fn apply_put(&mut self, collection: Collection, id: &str, document: &Value) {
        match collection {
            Collection::Bills => match serde_json::from_value::<Bill>(document.clone()) {
                Ok(bill) => self.upsert_bill(bill),
                Err(e) => warn!("Skipping malformed bill document {id}: {e}"),
            },
            Collection::Representatives => {
                match serde_json::from_value::<Representative>(document.clone()) {
                    Ok(rep) => self.upsert_representative(rep),
                    Err(e) => warn!("Skipping malformed representative document {id}: {e}"),
                }
            }
            Collection::Leadership => {
                let post = match id.parse::<LeadershipPost>() {
                    Ok(post) => post,
                    Err(_) => {
                        warn!("Skipping leadership document with unknown post key {id}");
                        return;
                    }
                };
                match serde_json::from_value(document.clone()) {
                    Ok(entry) => {
                        self.leadership.assign(post, entry);
                    }
                    Err(e) => warn!("Skipping malformed leadership document {id}: {e}"),
                }
            }
            Collection::Agenda => match serde_json::from_value::<AgendaDay>(document.clone()) {
                Ok(day) => self.upsert_agenda(day),
                Err(e) => warn!("Skipping malformed agenda document {id}: {e}"),
            },
        }
    }
}
