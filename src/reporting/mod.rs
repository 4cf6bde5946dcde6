//! Reporting
//!
//! Structured logging and the tabular view (hop rows, status
//! distribution, status filtering) shared by every output format.

pub mod logging;
pub mod table;

// Re-export commonly used items
pub use table::{HopRow, StatusCount, column_headers, filter_by_status, rows, status_distribution};
