//! Directory search and filtering.

use super::{Party, Region, Representative};

/// Filter criteria for the representative directory.
///
/// All criteria are conjunctive; an unset criterion matches everything.
#[derive(Debug, Clone, Default)]
pub struct RepresentativeFilter {
    /// Case-insensitive substring match against the display name.
    pub search: Option<String>,
    pub party: Option<Party>,
    pub region: Option<Region>,
}

impl RepresentativeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_party(mut self, party: Party) -> Self {
        self.party = Some(party);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn matches(&self, rep: &Representative) -> bool {
        if let Some(term) = &self.search {
            if !rep.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(party) = self.party {
            if rep.party != party {
                return false;
            }
        }
        if let Some(region) = self.region {
            if rep.region != region {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving roster order.
    pub fn apply<'a>(&self, reps: &'a [Representative]) -> Vec<&'a Representative> {
        reps.iter().filter(|r| self.matches(r)).collect()
    }
}
