//! Voter-name normalization.
//!
//! Roll-call input arrives as free text, often with the `Rep.` honorific and
//! inconsistent case. All comparisons against the roster go through the
//! normalized form defined here.

/// Strip one leading `Rep.` honorific (case-insensitive) and surrounding
/// whitespace.
///
/// The dot is required; a name that merely starts with the letters "rep"
/// is left alone.
pub fn strip_honorific(raw: &str) -> &str {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 4 && bytes[..4].eq_ignore_ascii_case(b"rep.") {
        return trimmed[4..].trim_start();
    }
    trimmed
}

/// Canonical comparison key: honorific stripped, trimmed, lowercased.
pub fn normalize(raw: &str) -> String {
    strip_honorific(raw).to_lowercase()
}

/// Whether two raw names refer to the same person under normalization.
pub fn same_person(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Whether an entry is blank or the `N/A` sentinel.
///
/// Such entries contribute to no tally count and no display list.
pub fn is_blank_or_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_honorific() {
        assert_eq!(strip_honorific("Rep. Ivanov"), "Ivanov");
        assert_eq!(strip_honorific("rep.  Petrov "), "Petrov");
        assert_eq!(strip_honorific("Rep.Sokolov"), "Sokolov");
        assert_eq!(strip_honorific("  Smirnova"), "Smirnova");
    }

    #[test]
    fn test_strip_honorific_leaves_rep_names_alone() {
        // A surname that happens to start with "Rep" is not an honorific
        assert_eq!(strip_honorific("Repin"), "Repin");
        assert_eq!(strip_honorific("Repnikova"), "Repnikova");
    }

    #[test]
    fn test_same_person_case_insensitive() {
        assert!(same_person("Rep. Ivanov", "IVANOV"));
        assert!(same_person("petrov", "Petrov "));
        assert!(!same_person("Ivanov", "Petrov"));
    }

    #[test]
    fn test_blank_and_sentinel_entries() {
        assert!(is_blank_or_sentinel(""));
        assert!(is_blank_or_sentinel("   "));
        assert!(is_blank_or_sentinel("N/A"));
        assert!(is_blank_or_sentinel("n/a"));
        assert!(!is_blank_or_sentinel("Ivanov"));
    }
}
