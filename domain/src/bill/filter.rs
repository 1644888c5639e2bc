//! Legislative-activity search and filtering.

use super::Bill;
use crate::core::name;

/// Filter criteria for the legislative-activity view.
///
/// All criteria are conjunctive. Bills in a terminal status (enacted, failed,
/// override won/lost) are hidden from the browse view unless a search term
/// is present, in which case every status is searchable.
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
    /// Exact match against the free-text bill type.
    pub kind: Option<String>,
    /// Exact match against the introduction date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Sponsor match, compared under name normalization.
    pub sponsor: Option<String>,
}

impl BillFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_sponsor(mut self, sponsor: impl Into<String>) -> Self {
        self.sponsor = Some(sponsor.into());
        self
    }

    fn searching(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn matches(&self, bill: &Bill) -> bool {
        if let Some(term) = &self.search {
            if !bill.title.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if !self.searching() && bill.status.is_terminal() {
            return false;
        }
        if let Some(kind) = &self.kind {
            if &bill.kind != kind {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if &bill.date != date {
                return false;
            }
        }
        if let Some(sponsor) = &self.sponsor {
            if !name::same_person(&bill.sponsor, sponsor) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, bills: &'a [Bill]) -> Vec<&'a Bill> {
        bills.iter().filter(|b| self.matches(b)).collect()
    }
}

/// Distinct bill types present, for populating the type filter.
pub fn distinct_kinds(bills: &[Bill]) -> Vec<String> {
    let mut kinds: Vec<String> = Vec::new();
    for bill in bills {
        if !bill.kind.is_empty() && !kinds.contains(&bill.kind) {
            kinds.push(bill.kind.clone());
        }
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::BillStatus;

    fn sample() -> Vec<Bill> {
        vec![
            Bill::new("bill-1", "Budget Amendment", BillStatus::InDebate, "Finance", "2025-01-01", "Rep. Ivanov"),
            Bill::new("bill-2", "Defense Appropriations", BillStatus::Enacted, "Defense", "2025-02-10", "Petrov"),
            Bill::new("bill-3", "Budget Ceiling", BillStatus::Scheduled, "Finance", "2025-02-10", "Rep. Petrov"),
        ]
    }

    #[test]
    fn test_terminal_statuses_hidden_without_search() {
        let bills = sample();
        let visible = BillFilter::new().apply(&bills);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|b| !b.status.is_terminal()));
    }

    #[test]
    fn test_search_reveals_terminal_statuses() {
        let bills = sample();
        let hits = BillFilter::new().with_search("defense").apply(&bills);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "bill-2");
    }

    #[test]
    fn test_sponsor_filter_normalizes_honorific() {
        let bills = sample();
        // "Petrov" must match both "Petrov" and "Rep. Petrov"
        let hits = BillFilter::new().with_sponsor("petrov").apply(&bills);
        assert_eq!(hits.len(), 1); // bill-2 is terminal and hidden
        assert_eq!(hits[0].id.as_str(), "bill-3");
    }

    #[test]
    fn test_kind_and_date_filters() {
        let bills = sample();
        let hits = BillFilter::new()
            .with_kind("Finance")
            .with_date("2025-02-10")
            .apply(&bills);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "bill-3");
    }

    #[test]
    fn test_distinct_kinds_preserves_first_seen_order() {
        let bills = sample();
        assert_eq!(distinct_kinds(&bills), vec!["Finance", "Defense"]);
    }
}
