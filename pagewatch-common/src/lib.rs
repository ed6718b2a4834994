//! # PageWatch Common Library
//!
//! Shared code for the PageWatch workspace:
//! - Error types
//! - Configuration resolution
//! - Database initialization and schema

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
