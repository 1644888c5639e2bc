//! Representative records.

use super::{Party, Region};
use crate::core::name;
use crate::leadership::LeadershipPost;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a representative.
///
/// Vote and leadership records reference representatives by this id, never by
/// display name, so renames do not break historical roll-calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresentativeId(String);

impl RepresentativeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepresentativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepresentativeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RepresentativeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A seated member of the chamber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub id: RepresentativeId,
    pub name: String,
    pub party: Party,
    pub region: Region,
    /// Portrait URL, if one has been uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Leadership post held, if any. The authoritative assignment lives in the
    /// leadership collection; this mirrors it for the admin form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leadership_role: Option<LeadershipPost>,
}

impl Representative {
    pub fn new(
        id: impl Into<RepresentativeId>,
        name: impl Into<String>,
        party: Party,
        region: Region,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            party,
            region,
            image: None,
            leadership_role: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_leadership_role(mut self, post: LeadershipPost) -> Self {
        self.leadership_role = Some(post);
        self
    }

    /// Display name with the honorific stripped.
    pub fn short_name(&self) -> &str {
        name::strip_honorific(&self.name)
    }

    /// Whether a raw input name refers to this member under normalization.
    pub fn matches_name(&self, raw: &str) -> bool {
        name::same_person(&self.name, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_strips_honorific() {
        let rep = Representative::new("rep-1", "Rep. Ivanov", Party::UnitedRussia, Region::Caucasia);
        assert!(rep.matches_name("ivanov"));
        assert!(rep.matches_name("Rep. IVANOV"));
        assert!(!rep.matches_name("Petrov"));
        assert_eq!(rep.short_name(), "Ivanov");
    }

    #[test]
    fn test_representative_serde_shape() {
        let rep = Representative::new("rep-1", "Ivanov", Party::Independent, Region::VolgaValley);
        let json = serde_json::to_value(&rep).unwrap();
        assert_eq!(json["id"], "rep-1");
        assert_eq!(json["party"], "Independent");
        assert_eq!(json["region"], "Volga Valley");
        // absent optionals stay off the wire
        assert!(json.get("image").is_none());
        assert!(json.get("leadershipRole").is_none());
    }
}
