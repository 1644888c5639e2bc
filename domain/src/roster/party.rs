//! Parliamentary factions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three factions a representative may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    #[serde(rename = "United Russia")]
    UnitedRussia,
    #[serde(rename = "Russia of the Future")]
    RussiaOfTheFuture,
    #[serde(rename = "Independent")]
    Independent,
}

impl Party {
    /// All parties, in the order they appear in filter dropdowns.
    pub const ALL: [Party; 3] = [
        Party::UnitedRussia,
        Party::RussiaOfTheFuture,
        Party::Independent,
    ];

    /// The display label, identical to the stored document value.
    pub fn label(&self) -> &'static str {
        match self {
            Party::UnitedRussia => "United Russia",
            Party::RussiaOfTheFuture => "Russia of the Future",
            Party::Independent => "Independent",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Party {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Party::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownParty(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_round_trip() {
        for party in Party::ALL {
            assert_eq!(party.label().parse::<Party>().unwrap(), party);
        }
    }

    #[test]
    fn test_party_parse_is_case_insensitive() {
        assert_eq!(
            "russia of the future".parse::<Party>().unwrap(),
            Party::RussiaOfTheFuture
        );
    }

    #[test]
    fn test_unknown_party_is_rejected() {
        assert!(matches!(
            "Whigs".parse::<Party>(),
            Err(DomainError::UnknownParty(_))
        ));
    }

    #[test]
    fn test_party_serde_uses_labels() {
        let json = serde_json::to_string(&Party::UnitedRussia).unwrap();
        assert_eq!(json, "\"United Russia\"");
    }
}
