//! Bill records.

use super::BillStatus;
use crate::rollcall::RollCall;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a bill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(String);

impl BillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BillId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BillId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A bill before the chamber, with its embedded roll-call record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    pub status: BillStatus,
    /// Free-text classification ("Finance", "Defense", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Date introduced, as entered (`YYYY-MM-DD`).
    pub date: String,
    pub latest_action: String,
    pub sponsor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_link: Option<String>,
    #[serde(default)]
    pub vote: RollCall,
}

impl Bill {
    pub fn new(
        id: impl Into<BillId>,
        title: impl Into<String>,
        status: BillStatus,
        kind: impl Into<String>,
        date: impl Into<String>,
        sponsor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            kind: kind.into(),
            date: date.into(),
            latest_action: String::new(),
            sponsor: sponsor.into(),
            document_link: None,
            vote: RollCall::default(),
        }
    }

    pub fn with_latest_action(mut self, action: impl Into<String>) -> Self {
        self.latest_action = action.into();
        self
    }

    pub fn with_document_link(mut self, url: impl Into<String>) -> Self {
        self.document_link = Some(url.into());
        self
    }

    pub fn with_vote(mut self, vote: RollCall) -> Self {
        self.vote = vote;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_serde_shape() {
        let bill = Bill::new(
            "bill-1",
            "Budget Amendment",
            BillStatus::Submitted,
            "Finance",
            "2025-01-01",
            "Rep. Ivanov",
        )
        .with_latest_action("Introduced");

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["id"], "bill-1");
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["type"], "Finance");
        assert_eq!(json["latestAction"], "Introduced");
        assert!(json.get("documentLink").is_none());

        let back: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(back, bill);
    }
}
