//! Order-of-business agendas.
//!
//! Purely structural: agenda days carry an ordered sequence of business
//! items, each optionally listing bills under review. No reconciliation
//! logic applies here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an agenda day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgendaId(String);

impl AgendaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgendaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgendaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgendaId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque rich-text markup, rendered verbatim.
///
/// The admin editor produces simple inline markup; readers pass it through
/// untouched. No parsing or sanitization happens in the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One bill listed under a business item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaLineItem {
    pub name: String,
    #[serde(default)]
    pub details: String,
}

/// A timed item of business within an agenda day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessItem {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub text: RichText,
    #[serde(default)]
    pub items: Vec<AgendaLineItem>,
}

/// A single day's order of business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaDay {
    pub id: AgendaId,
    pub date: String,
    #[serde(default)]
    pub business: Vec<BusinessItem>,
}

impl AgendaDay {
    pub fn new(id: impl Into<AgendaId>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            business: Vec::new(),
        }
    }

    pub fn with_business(mut self, item: BusinessItem) -> Self {
        self.business.push(item);
        self
    }
}
