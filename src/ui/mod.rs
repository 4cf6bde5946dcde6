//! User interface and interaction
//!
//! CLI parsing, URL list input, report rendering, progress reporting and
//! shell completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod input;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
pub use input::{collect_urls, normalize_urls};
pub use output::render_report;
pub use progress::ProgressReporter;
