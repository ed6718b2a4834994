//! Storage queries over the SQLite pool
//!
//! Free async functions per table. Storage assigns ids, audit history
//! reads are newest-first, issue batches are transactional.

pub mod audits;
pub mod comparisons;
pub mod issues;
pub mod pages;

pub use audits::*;
pub use comparisons::*;
pub use issues::*;
pub use pages::*;
