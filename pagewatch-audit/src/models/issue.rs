//! Issue record, severity, and category

use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Issue severity, ordered by descending weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "critical",
            IssueSeverity::Serious => "serious",
            IssueSeverity::Moderate => "moderate",
            IssueSeverity::Minor => "minor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "Critical",
            IssueSeverity::Serious => "Serious",
            IssueSeverity::Moderate => "Moderate",
            IssueSeverity::Minor => "Minor",
        }
    }

    /// Sort weight, heaviest first
    pub fn weight(&self) -> i64 {
        match self {
            IssueSeverity::Critical => 4,
            IssueSeverity::Serious => 3,
            IssueSeverity::Moderate => 2,
            IssueSeverity::Minor => 1,
        }
    }
}

impl FromStr for IssueSeverity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "critical" => Ok(IssueSeverity::Critical),
            "serious" => Ok(IssueSeverity::Serious),
            "moderate" => Ok(IssueSeverity::Moderate),
            "minor" => Ok(IssueSeverity::Minor),
            other => Err(Error::InvalidInput(format!("Unknown severity: {other}"))),
        }
    }
}

/// Accessibility issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    ColorContrast,
    Aria,
    Forms,
    Images,
    Navigation,
    Tables,
    Other,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::ColorContrast => "color_contrast",
            IssueCategory::Aria => "aria",
            IssueCategory::Forms => "forms",
            IssueCategory::Images => "images",
            IssueCategory::Navigation => "navigation",
            IssueCategory::Tables => "tables",
            IssueCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::ColorContrast => "Color Contrast",
            IssueCategory::Aria => "ARIA",
            IssueCategory::Forms => "Forms",
            IssueCategory::Images => "Images",
            IssueCategory::Navigation => "Navigation",
            IssueCategory::Tables => "Tables",
            IssueCategory::Other => "Other",
        }
    }
}

impl FromStr for IssueCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "color_contrast" => Ok(IssueCategory::ColorContrast),
            "aria" => Ok(IssueCategory::Aria),
            "forms" => Ok(IssueCategory::Forms),
            "images" => Ok(IssueCategory::Images),
            "navigation" => Ok(IssueCategory::Navigation),
            "tables" => Ok(IssueCategory::Tables),
            "other" => Ok(IssueCategory::Other),
            other => Err(Error::InvalidInput(format!("Unknown category: {other}"))),
        }
    }
}

/// One failing accessibility check attached to one audit
///
/// Created only for completed audits, one batch per audit, never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Assigned by storage on insert
    pub id: Option<i64>,
    pub audit_id: i64,
    pub severity: IssueSeverity,
    pub category: IssueCategory,
    pub title: String,
    pub description: String,
    pub element_selector: Option<String>,
    pub help_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
