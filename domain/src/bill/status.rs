//! Bill lifecycle labels.
//!
//! Seventeen fixed labels, deliberately *not* a state machine: the chamber's
//! clerks move a bill to any status from any status.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    #[serde(rename = "submitted")]
    Submitted,
    #[serde(rename = "scheduled")]
    Scheduled,
    #[serde(rename = "in debate")]
    InDebate,
    #[serde(rename = "amended")]
    Amended,
    #[serde(rename = "passed")]
    Passed,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "postponed")]
    Postponed,
    #[serde(rename = "sent to president")]
    SentToPresident,
    #[serde(rename = "withdrawn")]
    Withdrawn,
    #[serde(rename = "first hearing")]
    FirstHearing,
    #[serde(rename = "second hearing")]
    SecondHearing,
    #[serde(rename = "third hearing")]
    ThirdHearing,
    #[serde(rename = "enacted")]
    Enacted,
    #[serde(rename = "vetoed")]
    Vetoed,
    #[serde(rename = "override won")]
    OverrideWon,
    #[serde(rename = "override lost")]
    OverrideLost,
    #[serde(rename = "refiled")]
    Refiled,
}

impl BillStatus {
    /// All statuses, in admin-form order.
    pub const ALL: [BillStatus; 17] = [
        BillStatus::Submitted,
        BillStatus::Scheduled,
        BillStatus::InDebate,
        BillStatus::Amended,
        BillStatus::Passed,
        BillStatus::Failed,
        BillStatus::Postponed,
        BillStatus::SentToPresident,
        BillStatus::Withdrawn,
        BillStatus::FirstHearing,
        BillStatus::SecondHearing,
        BillStatus::ThirdHearing,
        BillStatus::Enacted,
        BillStatus::Vetoed,
        BillStatus::OverrideWon,
        BillStatus::OverrideLost,
        BillStatus::Refiled,
    ];

    /// The display label, identical to the stored document value.
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Submitted => "submitted",
            BillStatus::Scheduled => "scheduled",
            BillStatus::InDebate => "in debate",
            BillStatus::Amended => "amended",
            BillStatus::Passed => "passed",
            BillStatus::Failed => "failed",
            BillStatus::Postponed => "postponed",
            BillStatus::SentToPresident => "sent to president",
            BillStatus::Withdrawn => "withdrawn",
            BillStatus::FirstHearing => "first hearing",
            BillStatus::SecondHearing => "second hearing",
            BillStatus::ThirdHearing => "third hearing",
            BillStatus::Enacted => "enacted",
            BillStatus::Vetoed => "vetoed",
            BillStatus::OverrideWon => "override won",
            BillStatus::OverrideLost => "override lost",
            BillStatus::Refiled => "refiled",
        }
    }

    /// Whether the bill has reached the end of its journey.
    ///
    /// Terminal bills are hidden from the activity view unless the reader is
    /// explicitly searching.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BillStatus::Enacted
                | BillStatus::Failed
                | BillStatus::OverrideWon
                | BillStatus::OverrideLost
        )
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BillStatus::ALL
            .iter()
            .copied()
            .find(|st| st.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownStatus(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_seventeen_round_trip() {
        assert_eq!(BillStatus::ALL.len(), 17);
        for status in BillStatus::ALL {
            assert_eq!(status.label().parse::<BillStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_multi_word_labels_parse() {
        assert_eq!(
            "sent to president".parse::<BillStatus>().unwrap(),
            BillStatus::SentToPresident
        );
        assert_eq!(
            "Override Won".parse::<BillStatus>().unwrap(),
            BillStatus::OverrideWon
        );
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = BillStatus::ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                &BillStatus::Enacted,
                &BillStatus::Failed,
                &BillStatus::OverrideWon,
                &BillStatus::OverrideLost
            ]
        );
        // vetoed is not terminal: an override vote may still follow
        assert!(!BillStatus::Vetoed.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(matches!(
            "ratified".parse::<BillStatus>(),
            Err(DomainError::UnknownStatus(_))
        ));
    }
}
