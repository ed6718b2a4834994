//! Accessibility score value type

use pagewatch_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Accessibility score, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessibilityScore(i64);

impl AccessibilityScore {
    /// Construct a score; fails for values outside 0..=100
    pub fn new(value: i64) -> Result<Self> {
        if !(0..=100).contains(&value) {
            return Err(Error::InvalidInput(format!(
                "Score must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Zero score, the provisional value before a run completes
    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Signed difference against a previous score
    pub fn delta(&self, previous: &Self) -> i64 {
        self.0 - previous.0
    }

    /// Human-readable grade band
    pub fn grade(&self) -> &'static str {
        match self.0 {
            90..=100 => "Excellent",
            70..=89 => "Good",
            50..=69 => "Needs Improvement",
            _ => "Poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(AccessibilityScore::new(0).is_ok());
        assert!(AccessibilityScore::new(50).is_ok());
        assert!(AccessibilityScore::new(100).is_ok());
        assert!(AccessibilityScore::new(-1).is_err());
        assert!(AccessibilityScore::new(101).is_err());
    }

    #[test]
    fn test_delta() {
        let current = AccessibilityScore::new(85).unwrap();
        let previous = AccessibilityScore::new(70).unwrap();
        assert_eq!(current.delta(&previous), 15);
        assert_eq!(previous.delta(&current), -15);
        assert_eq!(current.delta(&current), 0);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(AccessibilityScore::new(95).unwrap().grade(), "Excellent");
        assert_eq!(AccessibilityScore::new(90).unwrap().grade(), "Excellent");
        assert_eq!(AccessibilityScore::new(70).unwrap().grade(), "Good");
        assert_eq!(AccessibilityScore::new(50).unwrap().grade(), "Needs Improvement");
        assert_eq!(AccessibilityScore::new(49).unwrap().grade(), "Poor");
    }
}
