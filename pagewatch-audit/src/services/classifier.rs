//! Issue classification
//!
//! Pure mapping from a failing check to a (category, severity) pair.
//! Category rules are order-sensitive: the first matching substring
//! wins.

use crate::models::{IssueCategory, IssueSeverity};

/// Map a check identifier to an issue category
pub fn categorize(check_id: &str) -> IssueCategory {
    if check_id.contains("color-contrast") {
        IssueCategory::ColorContrast
    } else if check_id.contains("aria") {
        IssueCategory::Aria
    } else if check_id.contains("label") || check_id.contains("form") {
        IssueCategory::Forms
    } else if check_id.contains("image") || check_id.contains("alt") {
        IssueCategory::Images
    } else if check_id.contains("tabindex") || check_id.contains("focus") || check_id.contains("link") {
        IssueCategory::Navigation
    } else if check_id.contains("table") || check_id.contains("th") || check_id.contains("td") {
        IssueCategory::Tables
    } else {
        IssueCategory::Other
    }
}

/// Map a failing check's sub-score (0..1) to a severity
///
/// Only failing checks are classified, so a sub-score of exactly 1 is
/// never seen here.
pub fn severity(sub_score: Option<f64>) -> IssueSeverity {
    match sub_score {
        None => IssueSeverity::Critical,
        Some(s) if s == 0.0 => IssueSeverity::Critical,
        Some(s) if s < 0.25 => IssueSeverity::Serious,
        Some(s) if s < 0.75 => IssueSeverity::Moderate,
        Some(_) => IssueSeverity::Minor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_rules() {
        assert_eq!(categorize("color-contrast"), IssueCategory::ColorContrast);
        assert_eq!(categorize("aria-allowed-attr"), IssueCategory::Aria);
        assert_eq!(categorize("label"), IssueCategory::Forms);
        assert_eq!(categorize("form-field-multiple-labels"), IssueCategory::Forms);
        assert_eq!(categorize("image-alt"), IssueCategory::Images);
        assert_eq!(categorize("input-image-alt"), IssueCategory::Images);
        assert_eq!(categorize("tabindex"), IssueCategory::Navigation);
        assert_eq!(categorize("focus-traps"), IssueCategory::Navigation);
        assert_eq!(categorize("link-name"), IssueCategory::Navigation);
        assert_eq!(categorize("table-duplicate-name"), IssueCategory::Tables);
        assert_eq!(categorize("td-headers-attr"), IssueCategory::Tables);
        assert_eq!(categorize("th-has-data-cells"), IssueCategory::Tables);
        assert_eq!(categorize("bypass"), IssueCategory::Other);
    }

    #[test]
    fn test_category_first_match_wins() {
        // Contains both "aria" and "label": the aria rule runs first
        assert_eq!(categorize("aria-input-field-label"), IssueCategory::Aria);
        // Contains both "form" and "image": the forms rule runs first
        assert_eq!(categorize("form-image-alt"), IssueCategory::Forms);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(severity(None), IssueSeverity::Critical);
        assert_eq!(severity(Some(0.0)), IssueSeverity::Critical);
        assert_eq!(severity(Some(0.1)), IssueSeverity::Serious);
        assert_eq!(severity(Some(0.24)), IssueSeverity::Serious);
        assert_eq!(severity(Some(0.25)), IssueSeverity::Moderate);
        assert_eq!(severity(Some(0.5)), IssueSeverity::Moderate);
        assert_eq!(severity(Some(0.74)), IssueSeverity::Moderate);
        assert_eq!(severity(Some(0.75)), IssueSeverity::Minor);
        assert_eq!(severity(Some(0.99)), IssueSeverity::Minor);
    }
}
