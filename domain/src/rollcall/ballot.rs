//! Ballot value objects.

use crate::core::error::DomainError;
use crate::core::name;
use crate::roster::{RepresentativeId, Roster};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An explicit ballot category.
///
/// Absence is deliberately not a choice: nobody votes "absent". It is derived
/// from the roster, except where a clerk records it in bulk text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallotChoice {
    Aye,
    Nay,
    Abstain,
}

impl BallotChoice {
    /// All choices, in the fixed reconciliation and display order.
    pub const ALL: [BallotChoice; 3] = [BallotChoice::Aye, BallotChoice::Nay, BallotChoice::Abstain];

    pub fn label(&self) -> &'static str {
        match self {
            BallotChoice::Aye => "aye",
            BallotChoice::Nay => "nay",
            BallotChoice::Abstain => "abstain",
        }
    }
}

impl fmt::Display for BallotChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BallotChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aye" | "ayes" => Ok(BallotChoice::Aye),
            "nay" | "nays" => Ok(BallotChoice::Nay),
            "abstain" | "abstains" => Ok(BallotChoice::Abstain),
            other => Err(DomainError::UnknownBallotChoice(other.to_string())),
        }
    }
}

/// A single entry in a roll-call category.
///
/// Input names that resolve against the roster become `Member` entries keyed
/// by stable id; names that match nobody are preserved verbatim as `Unlisted`.
/// Unlisted entries count toward their category's tally but never participate
/// in absence derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Voter {
    Member(RepresentativeId),
    Unlisted(String),
}

impl Voter {
    /// Resolve a raw input name against the roster.
    pub fn resolve(roster: &Roster, raw: &str) -> Self {
        match roster.resolve_name(raw) {
            Some(rep) => Voter::Member(rep.id.clone()),
            None => Voter::Unlisted(raw.trim().to_string()),
        }
    }

    pub fn member_id(&self) -> Option<&RepresentativeId> {
        match self {
            Voter::Member(id) => Some(id),
            Voter::Unlisted(_) => None,
        }
    }

    /// Display name, resolved through the roster where possible.
    ///
    /// A member no longer on the roster falls back to its raw id so the entry
    /// stays visible rather than silently vanishing.
    pub fn display_name<'a>(&'a self, roster: &'a Roster) -> &'a str {
        match self {
            Voter::Member(id) => roster.display_name(id).unwrap_or_else(|| id.as_str()),
            Voter::Unlisted(raw) => name::strip_honorific(raw),
        }
    }

    /// Whether this entry contributes to tallies and display lists.
    ///
    /// Members always count; unlisted entries count unless blank or the `N/A`
    /// sentinel.
    pub fn is_countable(&self) -> bool {
        match self {
            Voter::Member(_) => true,
            Voter::Unlisted(raw) => !name::is_blank_or_sentinel(raw),
        }
    }

    /// Identity-aware equality under the roster.
    ///
    /// Two entries are the same person when their ids match, their normalized
    /// names match, or an unlisted name normalizes to a member's name.
    pub fn same_as(&self, other: &Voter, roster: &Roster) -> bool {
        match (self, other) {
            (Voter::Member(a), Voter::Member(b)) => a == b,
            (Voter::Unlisted(a), Voter::Unlisted(b)) => name::same_person(a, b),
            (Voter::Member(id), Voter::Unlisted(raw)) | (Voter::Unlisted(raw), Voter::Member(id)) => {
                roster
                    .by_id(id)
                    .is_some_and(|rep| rep.matches_name(raw))
            }
        }
    }
}
