//! The roll-call record.

use super::ballot::{BallotChoice, Voter};
use crate::roster::{Representative, Roster};
use serde::{Deserialize, Serialize};

/// The categorized disposition of every eligible voter on a single bill.
///
/// Only the three explicit categories are stored. Absence is a derived view
/// over the roster (see [`RollCall::absentees`]), except where a clerk
/// recorded an explicit absent list in bulk text, kept in `recorded_absent`
/// and trusted only while non-empty. Toggle edits always clear it.
///
/// Invariant: a roster member appears in at most one of {ayes, nays, abstain}.
/// Both construction paths ([`super::toggle`] and [`super::apply_text`])
/// enforce this; the struct itself stays permissive so that legacy documents
/// load without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollCall {
    pub ayes: Vec<Voter>,
    pub nays: Vec<Voter>,
    pub abstain: Vec<Voter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_absent: Option<Vec<Voter>>,
}

impl RollCall {
    pub fn category(&self, choice: BallotChoice) -> &[Voter] {
        match choice {
            BallotChoice::Aye => &self.ayes,
            BallotChoice::Nay => &self.nays,
            BallotChoice::Abstain => &self.abstain,
        }
    }

    pub(crate) fn category_mut(&mut self, choice: BallotChoice) -> &mut Vec<Voter> {
        match choice {
            BallotChoice::Aye => &mut self.ayes,
            BallotChoice::Nay => &mut self.nays,
            BallotChoice::Abstain => &mut self.abstain,
        }
    }

    /// No explicit entries and no recorded absent list.
    pub fn is_empty(&self) -> bool {
        self.ayes.is_empty()
            && self.nays.is_empty()
            && self.abstain.is_empty()
            && self.recorded_absent.as_deref().is_none_or(|a| a.is_empty())
    }

    /// The explicit category currently holding a voter, if any.
    pub fn choice_of(&self, roster: &Roster, voter: &Voter) -> Option<BallotChoice> {
        BallotChoice::ALL
            .into_iter()
            .find(|&c| self.category(c).iter().any(|v| v.same_as(voter, roster)))
    }

    /// Whether any explicit entry refers to this roster member.
    fn contains_person(&self, roster: &Roster, rep: &Representative) -> bool {
        let as_voter = Voter::Member(rep.id.clone());
        BallotChoice::ALL
            .into_iter()
            .any(|c| self.category(c).iter().any(|v| v.same_as(&as_voter, roster)))
    }

    /// Derive the absentees: roster members present in none of the three
    /// explicit categories.
    ///
    /// Unlisted entries never shield a roster member from absence unless they
    /// normalize to that member's name.
    pub fn absentees(&self, roster: &Roster) -> Vec<Voter> {
        roster
            .iter()
            .filter(|rep| !self.contains_person(roster, rep))
            .map(|rep| Voter::Member(rep.id.clone()))
            .collect()
    }

    /// The absent list used for display and tallies.
    ///
    /// Returns `(list, derived)`: the recorded list when non-empty (`derived`
    /// false), otherwise the derivation over the roster (`derived` true). An
    /// explicitly empty recorded list is never trusted as "nobody absent".
    pub fn effective_absent(&self, roster: &Roster) -> (Vec<Voter>, bool) {
        match self.recorded_absent.as_deref() {
            Some(recorded) if !recorded.is_empty() => (recorded.to_vec(), false),
            _ => (self.absentees(roster), true),
        }
    }

    /// Countable display names for one explicit category.
    pub fn display_names(&self, roster: &Roster, choice: BallotChoice) -> Vec<String> {
        self.category(choice)
            .iter()
            .filter(|v| v.is_countable())
            .map(|v| v.display_name(roster).to_string())
            .collect()
    }

    /// Countable display names for the absent column.
    pub fn absent_display_names(&self, roster: &Roster) -> Vec<String> {
        self.effective_absent(roster)
            .0
            .iter()
            .filter(|v| v.is_countable())
            .map(|v| v.display_name(roster).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Party, Region, RepresentativeId};

    fn roster() -> Roster {
        Roster::new(vec![
            Representative::new("rep-1", "Ivanov", Party::UnitedRussia, Region::Caucasia),
            Representative::new("rep-2", "Petrov", Party::Independent, Region::VolgaValley),
            Representative::new("rep-3", "Smirnova", Party::RussiaOfTheFuture, Region::Caucasia),
        ])
    }

    fn member(id: &str) -> Voter {
        Voter::Member(RepresentativeId::from(id))
    }

    #[test]
    fn test_absentees_derived_from_roster() {
        let roster = roster();
        let vote = RollCall {
            ayes: vec![member("rep-1")],
            nays: vec![member("rep-2")],
            ..Default::default()
        };
        assert_eq!(vote.absentees(&roster), vec![member("rep-3")]);
    }

    #[test]
    fn test_unlisted_entry_matching_member_shields_from_absence() {
        let roster = roster();
        let vote = RollCall {
            ayes: vec![Voter::Unlisted("Rep. Smirnova".into())],
            ..Default::default()
        };
        let absent = vote.absentees(&roster);
        assert_eq!(absent, vec![member("rep-1"), member("rep-2")]);
    }

    #[test]
    fn test_unknown_name_does_not_shrink_absence() {
        let roster = roster();
        let vote = RollCall {
            ayes: vec![Voter::Unlisted("Ghost".into())],
            ..Default::default()
        };
        // all three members still absent; the unknown name counts only in ayes
        assert_eq!(vote.absentees(&roster).len(), 3);
    }

    #[test]
    fn test_empty_recorded_absent_is_not_trusted() {
        let roster = roster();
        let vote = RollCall {
            ayes: vec![member("rep-1")],
            recorded_absent: Some(vec![]),
            ..Default::default()
        };
        let (absent, derived) = vote.effective_absent(&roster);
        assert!(derived);
        assert_eq!(absent.len(), 2);
    }

    #[test]
    fn test_nonempty_recorded_absent_is_trusted() {
        let roster = roster();
        let vote = RollCall {
            ayes: vec![member("rep-1")],
            recorded_absent: Some(vec![member("rep-2")]),
            ..Default::default()
        };
        let (absent, derived) = vote.effective_absent(&roster);
        assert!(!derived);
        // stale: rep-3 is unaccounted for, and that stays visible
        assert_eq!(absent, vec![member("rep-2")]);
    }

    #[test]
    fn test_serde_round_trip_without_recorded_absent() {
        let vote = RollCall {
            ayes: vec![member("rep-1"), Voter::Unlisted("Ghost".into())],
            ..Default::default()
        };
        let json = serde_json::to_value(&vote).unwrap();
        assert!(json.get("recordedAbsent").is_none());
        let back: RollCall = serde_json::from_value(json).unwrap();
        assert_eq!(back, vote);
    }
}
