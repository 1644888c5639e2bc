//! The roster: the authoritative list of eligible voters.
//!
//! A [`Roster`] is a read-only snapshot taken at the moment a reconciliation
//! runs. The reconciler never mutates it; staleness between a snapshot and a
//! stored roll-call is surfaced by the tally, not hidden.

mod entities;
mod filter;
mod party;
mod region;

pub use entities::{Representative, RepresentativeId};
pub use filter::RepresentativeFilter;
pub use party::Party;
pub use region::Region;

use crate::core::name;
use serde::{Deserialize, Serialize};

/// An ordered snapshot of the chamber's membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Representative>,
}

impl Roster {
    pub fn new(members: Vec<Representative>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Representative> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Representative] {
        &self.members
    }

    pub fn by_id(&self, id: &RepresentativeId) -> Option<&Representative> {
        self.members.iter().find(|r| &r.id == id)
    }

    /// Resolve a raw input name to a member by normalized match.
    ///
    /// Strips the `Rep.` honorific and compares case-insensitively. Returns
    /// `None` for names that match no member; callers decide whether to
    /// preserve such names as unlisted voters.
    pub fn resolve_name(&self, raw: &str) -> Option<&Representative> {
        let key = name::normalize(raw);
        self.members
            .iter()
            .find(|r| name::normalize(&r.name) == key)
    }

    /// Display name for an id, with the honorific stripped.
    pub fn display_name(&self, id: &RepresentativeId) -> Option<&str> {
        self.by_id(id).map(|r| r.short_name())
    }
}

impl FromIterator<Representative> for Roster {
    fn from_iter<I: IntoIterator<Item = Representative>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
