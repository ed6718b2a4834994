//! Audit comparison record and trend classification

use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Directional classification of a score change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Degrading,
    Stable,
}

impl Trend {
    /// Classify the sign of a score delta
    pub fn from_delta(delta: i64) -> Self {
        match delta {
            d if d > 0 => Trend::Improving,
            d if d < 0 => Trend::Degrading,
            _ => Trend::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Degrading => "degrading",
            Trend::Stable => "stable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Degrading => "Degrading",
            Trend::Stable => "Stable",
        }
    }
}

impl FromStr for Trend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "improving" => Ok(Trend::Improving),
            "degrading" => Ok(Trend::Degrading),
            "stable" => Ok(Trend::Stable),
            other => Err(Error::InvalidInput(format!("Unknown trend: {other}"))),
        }
    }
}

/// Derived diff between two audits of the same page
///
/// Created at most once per completed audit, only when a prior
/// completed audit exists; never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditComparison {
    /// Assigned by storage on insert
    pub id: Option<i64>,
    pub current_audit_id: i64,
    pub previous_audit_id: i64,
    pub score_delta: i64,
    pub new_issues_count: i64,
    pub resolved_issues_count: i64,
    pub persistent_issues_count: i64,
    pub trend: Trend,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_delta() {
        assert_eq!(Trend::from_delta(15), Trend::Improving);
        assert_eq!(Trend::from_delta(1), Trend::Improving);
        assert_eq!(Trend::from_delta(0), Trend::Stable);
        assert_eq!(Trend::from_delta(-1), Trend::Degrading);
        assert_eq!(Trend::from_delta(-15), Trend::Degrading);
    }

    #[test]
    fn test_trend_roundtrip() {
        for trend in [Trend::Improving, Trend::Degrading, Trend::Stable] {
            assert_eq!(trend.as_str().parse::<Trend>().unwrap(), trend);
        }
        assert!("sideways".parse::<Trend>().is_err());
    }
}
