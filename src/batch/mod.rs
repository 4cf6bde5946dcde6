//! Batch execution: bounded fan-out, ordered aggregation, scheduling

pub mod aggregator;
pub mod pool;
pub mod scheduler;

pub use aggregator::{Summary, aggregate, summarize};
pub use pool::{CancelSignal, CollectError, OrderedCollector, fan_out};
pub use scheduler::{ProgressSink, Scheduler};
