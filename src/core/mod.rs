//! Core types and foundational components
//!
//! This module contains the probe data model, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{ProbeError, Result};
pub use types::{OutcomeKind, ProbeOutcome, ProbeRequest, RedirectHop, ResultRecord, ResultSet};
