//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The roll-call reconciler itself never fails: malformed vote input is
/// absorbed, not rejected. What can fail is parsing the fixed label sets
/// (party, region, status, leadership post) from free text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown party: {0}")]
    UnknownParty(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Unknown bill status: {0}")]
    UnknownStatus(String),

    #[error("Unknown leadership post: {0}")]
    UnknownPost(String),

    #[error("Unknown ballot category: {0}")]
    UnknownBallotChoice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnknownStatus("ratified".to_string());
        assert_eq!(error.to_string(), "Unknown bill status: ratified");
    }
}
