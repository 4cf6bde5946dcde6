//! urlprobe: check status codes and redirect chains of URL lists
//!
//! The library runs a batch of probes with bounded concurrency and
//! returns one record per input URL, in input order, whatever order the
//! probes finished in.
//!
//! ```no_run
//! use urlprobe::{CancelSignal, Config, HttpExecutor, Scheduler, summarize};
//!
//! # async fn run() -> urlprobe::Result<()> {
//! let config = Config::default();
//! let scheduler = Scheduler::new(HttpExecutor::from_config(&config)?);
//! let urls = vec!["https://example.com".to_string()];
//!
//! let results = scheduler
//!     .run_batch(urls, &config, None, &CancelSignal::new())
//!     .await?;
//! println!("{} URLs returned 2xx", summarize(&results).success_count);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod core;
pub mod probe;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use batch::{CancelSignal, ProgressSink, Scheduler, Summary, aggregate, summarize};
pub use config::{CliConfig, Config};
pub use core::{
    OutcomeKind, ProbeError, ProbeOutcome, ProbeRequest, RedirectHop, ResultRecord, ResultSet, Result,
};
pub use probe::{HttpExecutor, ProbeExecutor, classify, probe};
