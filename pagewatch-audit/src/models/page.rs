//! Page record and audit cadence
//!
//! Page identity and cadence are owned by the management layer; the
//! engine reads pages and updates only `last_audited_at`.

use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configured recurrence interval for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    /// Recurrence interval in hours
    pub fn interval_hours(&self) -> i64 {
        match self {
            Cadence::Daily => 24,
            Cadence::Weekly => 168,
            Cadence::Biweekly => 336,
            Cadence::Monthly => 720,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Daily => "Daily",
            Cadence::Weekly => "Weekly",
            Cadence::Biweekly => "Biweekly",
            Cadence::Monthly => "Monthly",
        }
    }
}

impl FromStr for Cadence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "biweekly" => Ok(Cadence::Biweekly),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(Error::InvalidInput(format!("Unknown cadence: {other}"))),
        }
    }
}

/// A tracked web page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Assigned by storage on insert
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub url: String,
    pub name: Option<String>,
    pub cadence: Cadence,
    pub enabled: bool,
    pub last_audited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// New enabled page, never audited
    pub fn new(url: impl Into<String>, cadence: Cadence, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            project_id: None,
            url: url.into(),
            name: None,
            cadence,
            enabled: true,
            last_audited_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
