//! Reconciliation: building a complete roll-call from partial input.
//!
//! Two input paths produce a [`RollCall`]: per-member toggling from the admin
//! form, and bulk comma-separated text. Both enforce the same invariant
//! (a person sits in at most one explicit category) and both treat absence
//! as derived unless the clerk recorded it explicitly.

use super::ballot::{BallotChoice, Voter};
use super::roll_call::RollCall;
use crate::roster::Roster;

/// Raw bulk-text vote input, one comma-separated field per category.
///
/// An empty field means "keep what the record already has", not "clear".
#[derive(Debug, Clone, Default)]
pub struct RawBallotText {
    pub ayes: String,
    pub nays: String,
    pub abstain: String,
    pub absent: String,
}

impl RawBallotText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ayes(mut self, text: impl Into<String>) -> Self {
        self.ayes = text.into();
        self
    }

    pub fn with_nays(mut self, text: impl Into<String>) -> Self {
        self.nays = text.into();
        self
    }

    pub fn with_abstain(mut self, text: impl Into<String>) -> Self {
        self.abstain = text.into();
        self
    }

    pub fn with_absent(mut self, text: impl Into<String>) -> Self {
        self.absent = text.into();
        self
    }
}

/// Toggle a voter's membership in an explicit category.
///
/// The voter is removed from whichever category holds it; if it was not
/// already in `target` it is then inserted there. Toggling the category a
/// voter already occupies therefore clears its membership entirely, leaving
/// the member to fall out as derived-absent. Mutual exclusivity holds by
/// construction (remove-before-insert).
///
/// Pure: returns the new record, clearing any recorded absent list; on the
/// toggle path absence is always derived. The caller persists.
pub fn toggle(roster: &Roster, current: &RollCall, raw_name: &str, target: BallotChoice) -> RollCall {
    let voter = Voter::resolve(roster, raw_name);
    let was_in_target = current
        .category(target)
        .iter()
        .any(|v| v.same_as(&voter, roster));

    let mut next = RollCall::default();
    for choice in BallotChoice::ALL {
        *next.category_mut(choice) = current
            .category(choice)
            .iter()
            .filter(|v| !v.same_as(&voter, roster))
            .cloned()
            .collect();
    }
    if !was_in_target {
        next.category_mut(target).push(voter);
    }
    next
}

/// Apply bulk-text input over an existing record.
///
/// Per category: comma-split, trim, drop empties; an empty field falls back
/// to the existing record's entries. Names resolve against the roster;
/// non-matching names are preserved as unlisted voters.
///
/// Exclusivity is enforced across *and within* categories in fixed
/// {ayes, nays, abstain} order: the first occurrence of a person wins and
/// later occurrences are dropped.
///
/// The absent field is recorded only when it parses to a non-empty list; an
/// explicitly empty absent field is never trusted as "nobody absent" and
/// leaves absence derived.
pub fn apply_text(roster: &Roster, existing: &RollCall, raw: &RawBallotText) -> RollCall {
    let field = |text: &str, fallback: &[Voter]| -> Vec<Voter> {
        if text.trim().is_empty() {
            fallback.to_vec()
        } else {
            parse_names(roster, text)
        }
    };

    let mut next = RollCall {
        ayes: field(&raw.ayes, &existing.ayes),
        nays: field(&raw.nays, &existing.nays),
        abstain: field(&raw.abstain, &existing.abstain),
        recorded_absent: None,
    };
    dedup_across_categories(roster, &mut next);

    let absent = field(&raw.absent, existing.recorded_absent.as_deref().unwrap_or(&[]));
    if !absent.is_empty() {
        next.recorded_absent = Some(absent);
    }
    next
}

/// Build an id-keyed record from legacy name lists.
///
/// This is the migration entry point for documents that stored plain display
/// names: each name resolves by normalized match, unmatched names stay
/// unlisted, and the same exclusivity policy as the text path applies.
pub fn from_name_lists(
    roster: &Roster,
    ayes: &[String],
    nays: &[String],
    abstain: &[String],
    absent: &[String],
) -> RollCall {
    let resolve_all =
        |names: &[String]| -> Vec<Voter> { names.iter().map(|n| Voter::resolve(roster, n)).collect() };

    let mut record = RollCall {
        ayes: resolve_all(ayes),
        nays: resolve_all(nays),
        abstain: resolve_all(abstain),
        recorded_absent: None,
    };
    dedup_across_categories(roster, &mut record);

    let absent = resolve_all(absent);
    if !absent.is_empty() {
        record.recorded_absent = Some(absent);
    }
    record
}

fn parse_names(roster: &Roster, text: &str) -> Vec<Voter> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| Voter::resolve(roster, t))
        .collect()
}

/// First occurrence wins, in {ayes, nays, abstain} order.
fn dedup_across_categories(roster: &Roster, record: &mut RollCall) {
    let mut seen: Vec<Voter> = Vec::new();
    for choice in BallotChoice::ALL {
        let category = record.category_mut(choice);
        let mut kept = Vec::with_capacity(category.len());
        for voter in category.drain(..) {
            if seen.iter().any(|s| s.same_as(&voter, roster)) {
                continue;
            }
            seen.push(voter.clone());
            kept.push(voter);
        }
        *category = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Party, Region, Representative, RepresentativeId};

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

    /// Set-wise partition equality, ignoring insertion order.
    fn partition_eq(a: &RollCall, b: &RollCall, roster: &Roster) -> bool {
        BallotChoice::ALL.into_iter().all(|c| {
            let (xs, ys) = (a.category(c), b.category(c));
            xs.len() == ys.len() && xs.iter().all(|x| ys.iter().any(|y| y.same_as(x, roster)))
        })
    }

    #[test]
    fn test_toggle_moves_between_categories() {
        let roster = roster();
        let v1 = toggle(&roster, &RollCall::default(), "Petrov", BallotChoice::Aye);
        assert_eq!(v1.ayes, vec![member("rep-2")]);
        assert_eq!(v1.absentees(&roster), vec![member("rep-1"), member("rep-3")]);

        let v2 = toggle(&roster, &v1, "Petrov", BallotChoice::Nay);
        assert!(v2.ayes.is_empty());
        assert_eq!(v2.nays, vec![member("rep-2")]);
    }

    #[test]
    fn test_toggle_same_category_clears_membership() {
        let roster = roster();
        let v1 = toggle(&roster, &RollCall::default(), "Petrov", BallotChoice::Aye);
        let v2 = toggle(&roster, &v1, "Petrov", BallotChoice::Aye);
        assert!(v2.is_empty());
        assert_eq!(v2.absentees(&roster).len(), 3);
    }

    #[test]
    fn test_toggle_pair_restores_partition() {
        let roster = roster();
        let mut v = RollCall::default();
        v = toggle(&roster, &v, "Ivanov", BallotChoice::Nay);
        v = toggle(&roster, &v, "Smirnova", BallotChoice::Abstain);

        // voter already in the target category: clear, then re-add
        let once = toggle(&roster, &v, "Smirnova", BallotChoice::Abstain);
        let twice = toggle(&roster, &once, "Smirnova", BallotChoice::Abstain);
        assert!(partition_eq(&twice, &v, &roster));
        assert_eq!(twice.absentees(&roster), v.absentees(&roster));

        // voter in no category: add, then clear
        let once = toggle(&roster, &v, "Petrov", BallotChoice::Aye);
        let twice = toggle(&roster, &once, "Petrov", BallotChoice::Aye);
        assert!(partition_eq(&twice, &v, &roster));
        assert_eq!(twice.absentees(&roster), v.absentees(&roster));
    }

    #[test]
    fn test_toggle_exclusivity_over_random_sequences() {
        let roster = roster();
        let names = ["Ivanov", "Petrov", "Smirnova", "Ghost"];
        let mut v = RollCall::default();
        // a fixed pseudo-random walk over (name, category) pairs
        let mut seed: u64 = 0x9E3779B97F4A7C15;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let name = names[(seed >> 33) as usize % names.len()];
            let choice = BallotChoice::ALL[(seed >> 13) as usize % 3];
            v = toggle(&roster, &v, name, choice);

            for probe in names {
                let voter = Voter::resolve(&roster, probe);
                let holding: Vec<_> = BallotChoice::ALL
                    .into_iter()
                    .filter(|&c| v.category(c).iter().any(|x| x.same_as(&voter, &roster)))
                    .collect();
                assert!(holding.len() <= 1, "{probe} held {holding:?}");
            }
        }
    }

    #[test]
    fn test_toggle_clears_recorded_absent() {
        let roster = roster();
        let stale = RollCall {
            recorded_absent: Some(vec![member("rep-1")]),
            ..Default::default()
        };
        let next = toggle(&roster, &stale, "Petrov", BallotChoice::Aye);
        assert!(next.recorded_absent.is_none());
    }

    #[test]
    fn test_toggle_unknown_name_is_preserved() {
        let roster = roster();
        let v = toggle(&roster, &RollCall::default(), "Rep. Ghost", BallotChoice::Aye);
        assert_eq!(v.ayes, vec![Voter::Unlisted("Rep. Ghost".into())]);
        // the unknown name does not shrink the derived absentees
        assert_eq!(v.absentees(&roster).len(), 3);
    }

    #[test]
    fn test_apply_text_parses_and_strips_honorifics() {
        let roster = roster();
        let raw = RawBallotText::new().with_ayes("Rep. Ivanov, Petrov");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert_eq!(v.ayes, vec![member("rep-1"), member("rep-2")]);
        assert!(v.recorded_absent.is_none());
        assert_eq!(v.absentees(&roster), vec![member("rep-3")]);
    }

    #[test]
    fn test_apply_text_empty_field_keeps_existing() {
        let roster = roster();
        let existing = RollCall {
            nays: vec![member("rep-3")],
            ..Default::default()
        };
        let raw = RawBallotText::new().with_ayes("Ivanov");
        let v = apply_text(&roster, &existing, &raw);
        assert_eq!(v.ayes, vec![member("rep-1")]);
        assert_eq!(v.nays, vec![member("rep-3")]);
    }

    #[test]
    fn test_apply_text_enforces_exclusivity_first_category_wins() {
        let roster = roster();
        let raw = RawBallotText::new()
            .with_ayes("Ivanov, Petrov")
            .with_nays("Petrov, Smirnova")
            .with_abstain("Rep. Ivanov");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert_eq!(v.ayes, vec![member("rep-1"), member("rep-2")]);
        assert_eq!(v.nays, vec![member("rep-3")]);
        assert!(v.abstain.is_empty());
    }

    #[test]
    fn test_apply_text_drops_duplicates_within_a_category() {
        let roster = roster();
        let raw = RawBallotText::new().with_ayes("Ivanov, ivanov, Rep. Ivanov");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert_eq!(v.ayes, vec![member("rep-1")]);
    }

    #[test]
    fn test_apply_text_records_nonempty_absent_only() {
        let roster = roster();
        let raw = RawBallotText::new().with_ayes("Ivanov").with_absent("Smirnova");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert_eq!(v.recorded_absent, Some(vec![member("rep-3")]));

        // an empty absent field leaves absence derived
        let raw = RawBallotText::new().with_ayes("Ivanov");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert!(v.recorded_absent.is_none());
        assert_eq!(v.effective_absent(&roster).0.len(), 2);
    }

    #[test]
    fn test_apply_text_drops_blank_entries() {
        let roster = roster();
        let raw = RawBallotText::new().with_ayes("Ivanov, , ,Petrov,");
        let v = apply_text(&roster, &RollCall::default(), &raw);
        assert_eq!(v.ayes.len(), 2);
    }

    #[test]
    fn test_from_name_lists_migrates_legacy_record() {
        let roster = roster();
        let v = from_name_lists(
            &roster,
            &["Rep. Ivanov".to_string(), "Ghost".to_string()],
            &["PETROV".to_string()],
            &[],
            &["Smirnova".to_string()],
        );
        assert_eq!(v.ayes, vec![member("rep-1"), Voter::Unlisted("Ghost".into())]);
        assert_eq!(v.nays, vec![member("rep-2")]);
        assert_eq!(v.recorded_absent, Some(vec![member("rep-3")]));
    }
}
