//! Engine services
//!
//! Execution flow: `Scheduler` → `AuditOrchestrator` → (`RetryPolicy` ⇄
//! scoring client) → classifier → storage → comparison → storage. The
//! trend calculator runs independently over stored history.

pub mod classifier;
pub mod comparison;
pub mod orchestrator;
pub mod pagespeed;
pub mod retry;
pub mod scheduler;
pub mod trend;

pub use orchestrator::AuditOrchestrator;
pub use pagespeed::{FailingCheck, PageSpeedClient, ScoringClient, ScoringError, ScoringResult};
pub use retry::RetryPolicy;
pub use scheduler::Scheduler;
