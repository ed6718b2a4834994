//! pagewatch-audit library interface
//!
//! The audit engine: domain models, storage queries, the external
//! scoring client, and the orchestration/comparison/trend/scheduling
//! services. Exposed as a library for integration testing and for
//! embedding (dashboards, manual run-now actions).

pub mod db;
pub mod models;
pub mod services;

pub use pagewatch_common::{Error, Result};
