//! Domain models for the audit engine
//!
//! All variant sets are closed enums with exhaustive matching at every
//! consumption site (labels, weights, interval hours, storage strings),
//! so a new variant forces a compile-time review of all match sites.

pub mod audit;
pub mod comparison;
pub mod issue;
pub mod page;
pub mod score;

pub use audit::{Audit, AuditStatus};
pub use comparison::{AuditComparison, Trend};
pub use issue::{Issue, IssueCategory, IssueSeverity};
pub use page::{Cadence, Page};
pub use score::AccessibilityScore;
