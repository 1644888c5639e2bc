//! Leadership posts and their assignments.
//!
//! Three posts exist; each holds at most one member at a time. Assigning a
//! new holder supersedes the previous one, and clearing the post from the
//! representative side removes the entry. The board never accumulates
//! duplicate holders.

use crate::core::error::DomainError;
use crate::roster::{Party, Region, Representative, RepresentativeId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The role key for a leadership post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeadershipPost {
    #[serde(rename = "speaker")]
    Speaker,
    #[serde(rename = "majorityLeader")]
    MajorityLeader,
    #[serde(rename = "minorityLeader")]
    MinorityLeader,
}

impl LeadershipPost {
    pub const ALL: [LeadershipPost; 3] = [
        LeadershipPost::Speaker,
        LeadershipPost::MajorityLeader,
        LeadershipPost::MinorityLeader,
    ];

    /// Stable document key for this post.
    pub fn key(&self) -> &'static str {
        match self {
            LeadershipPost::Speaker => "speaker",
            LeadershipPost::MajorityLeader => "majorityLeader",
            LeadershipPost::MinorityLeader => "minorityLeader",
        }
    }

    /// Human-readable role title.
    pub fn title(&self) -> &'static str {
        match self {
            LeadershipPost::Speaker => "Duma Speaker",
            LeadershipPost::MajorityLeader => "Majority Leader",
            LeadershipPost::MinorityLeader => "Minority Leader",
        }
    }
}

impl fmt::Display for LeadershipPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for LeadershipPost {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LeadershipPost::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(trimmed) || p.title().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownPost(trimmed.to_string()))
    }
}

/// A leadership entry: who holds a post, with display detail.
///
/// Keyed back to the roster by stable id; name and party are denormalized for
/// rendering but the id is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipEntry {
    /// Role title, e.g. "Duma Speaker".
    pub role: String,
    pub name: String,
    pub party: Party,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub bio: String,
    pub rep_id: RepresentativeId,
}

impl LeadershipEntry {
    /// Build the entry for a representative taking a post.
    pub fn for_representative(rep: &Representative, post: LeadershipPost, bio: impl Into<String>) -> Self {
        Self {
            role: post.title().to_string(),
            name: rep.name.clone(),
            party: rep.party,
            image: rep.image.clone(),
            bio: bio.into(),
            rep_id: rep.id.clone(),
        }
    }
}

/// The full set of current leadership assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadershipBoard {
    entries: BTreeMap<LeadershipPost, LeadershipEntry>,
}

impl LeadershipBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, post: LeadershipPost) -> Option<&LeadershipEntry> {
        self.entries.get(&post)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadershipPost, &LeadershipEntry)> {
        self.entries.iter().map(|(p, e)| (*p, e))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assign a post, superseding any previous holder.
    ///
    /// Returns the superseded entry, if there was one.
    pub fn assign(&mut self, post: LeadershipPost, entry: LeadershipEntry) -> Option<LeadershipEntry> {
        self.entries.insert(post, entry)
    }

    /// Remove the entry for a post.
    pub fn clear_post(&mut self, post: LeadershipPost) -> Option<LeadershipEntry> {
        self.entries.remove(&post)
    }

    /// Remove every entry referencing a representative.
    ///
    /// Used when the representative sheds the role or leaves the chamber.
    /// Returns the posts that were cleared.
    pub fn clear_for(&mut self, rep_id: &RepresentativeId) -> Vec<LeadershipPost> {
        let cleared: Vec<LeadershipPost> = self
            .entries
            .iter()
            .filter(|(_, e)| &e.rep_id == rep_id)
            .map(|(p, _)| *p)
            .collect();
        for post in &cleared {
            self.entries.remove(post);
        }
        cleared
    }

    /// The post currently held by a representative, if any.
    pub fn post_of(&self, rep_id: &RepresentativeId) -> Option<LeadershipPost> {
        self.entries
            .iter()
            .find(|(_, e)| &e.rep_id == rep_id)
            .map(|(p, _)| *p)
    }

    /// Resolve a post holder's region through the roster back-reference.
    ///
    /// Renders as `N/A` upstream when the holder is no longer on the roster.
    pub fn region_of(&self, post: LeadershipPost, roster: &Roster) -> Option<Region> {
        self.get(post)
            .and_then(|e| roster.by_id(&e.rep_id))
            .map(|rep| rep.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(id: &str, name: &str, party: Party) -> Representative {
        Representative::new(id, name, party, Region::CentralSteppes)
    }

    #[test]
    fn test_post_keys_and_titles() {
        assert_eq!(LeadershipPost::Speaker.key(), "speaker");
        assert_eq!(LeadershipPost::MajorityLeader.key(), "majorityLeader");
        assert_eq!(LeadershipPost::Speaker.title(), "Duma Speaker");
        assert_eq!("minorityLeader".parse::<LeadershipPost>().unwrap(), LeadershipPost::MinorityLeader);
        assert_eq!("Duma Speaker".parse::<LeadershipPost>().unwrap(), LeadershipPost::Speaker);
    }

    #[test]
    fn test_assign_supersedes_previous_holder() {
        let mut board = LeadershipBoard::new();
        let old = rep("rep-1", "Ivanov", Party::UnitedRussia);
        let new = rep("rep-2", "Petrov", Party::UnitedRussia);

        board.assign(
            LeadershipPost::Speaker,
            LeadershipEntry::for_representative(&old, LeadershipPost::Speaker, ""),
        );
        let superseded = board.assign(
            LeadershipPost::Speaker,
            LeadershipEntry::for_representative(&new, LeadershipPost::Speaker, ""),
        );

        assert_eq!(superseded.unwrap().rep_id, RepresentativeId::from("rep-1"));
        assert_eq!(
            board.get(LeadershipPost::Speaker).unwrap().rep_id,
            RepresentativeId::from("rep-2")
        );
        // one holder per post: no duplicate entries accumulate
        assert_eq!(board.iter().count(), 1);
    }

    #[test]
    fn test_clear_for_removes_all_references() {
        let mut board = LeadershipBoard::new();
        let holder = rep("rep-1", "Ivanov", Party::Independent);
        board.assign(
            LeadershipPost::MinorityLeader,
            LeadershipEntry::for_representative(&holder, LeadershipPost::MinorityLeader, "bio"),
        );

        let cleared = board.clear_for(&RepresentativeId::from("rep-1"));
        assert_eq!(cleared, vec![LeadershipPost::MinorityLeader]);
        assert!(board.is_empty());

        // clearing an unreferenced rep is a no-op
        assert!(board.clear_for(&RepresentativeId::from("rep-9")).is_empty());
    }

    #[test]
    fn test_region_resolves_through_back_reference() {
        let mut board = LeadershipBoard::new();
        let holder = rep("rep-1", "Ivanov", Party::UnitedRussia);
        let roster = Roster::new(vec![holder.clone()]);
        board.assign(
            LeadershipPost::Speaker,
            LeadershipEntry::for_representative(&holder, LeadershipPost::Speaker, ""),
        );

        assert_eq!(
            board.region_of(LeadershipPost::Speaker, &roster),
            Some(Region::CentralSteppes)
        );
        // holder gone from the roster: region unresolvable
        assert_eq!(board.region_of(LeadershipPost::Speaker, &Roster::default()), None);
    }

    #[test]
    fn test_entry_serde_uses_camel_case_keys() {
        let holder = rep("rep-1", "Ivanov", Party::UnitedRussia);
        let entry = LeadershipEntry::for_representative(&holder, LeadershipPost::MajorityLeader, "bio");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "Majority Leader");
        assert_eq!(json["repId"], "rep-1");
    }
}
