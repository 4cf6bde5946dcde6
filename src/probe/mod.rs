//! Probing a single URL
//!
//! The executor performs the request and walks redirects; the classifier
//! maps terminal statuses onto outcome kinds.

pub mod classifier;
pub mod executor;

// Re-export commonly used items
pub use classifier::{classify, outcome_icon, status_icon};
pub use executor::{HttpExecutor, ProbeExecutor, probe};
