//! Electoral regions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six named regions a representative may be seated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Volga Valley")]
    VolgaValley,
    #[serde(rename = "Northern Frontier")]
    NorthernFrontier,
    #[serde(rename = "Caucasia")]
    Caucasia,
    #[serde(rename = "Central Steppes")]
    CentralSteppes,
    #[serde(rename = "Siberian Frontier")]
    SiberianFrontier,
    #[serde(rename = "Outer Mongolia")]
    OuterMongolia,
}

impl Region {
    /// All regions, in filter-dropdown order.
    pub const ALL: [Region; 6] = [
        Region::VolgaValley,
        Region::NorthernFrontier,
        Region::Caucasia,
        Region::CentralSteppes,
        Region::SiberianFrontier,
        Region::OuterMongolia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::VolgaValley => "Volga Valley",
            Region::NorthernFrontier => "Northern Frontier",
            Region::Caucasia => "Caucasia",
            Region::CentralSteppes => "Central Steppes",
            Region::SiberianFrontier => "Siberian Frontier",
            Region::OuterMongolia => "Outer Mongolia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownRegion(trimmed.to_string()))
    }
}
