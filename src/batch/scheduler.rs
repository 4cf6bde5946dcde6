use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;

use crate::batch::aggregator::{aggregate, summarize};
use crate::batch::pool::{CancelSignal, fan_out};
use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::error::{ProbeError, Result};
use crate::core::types::{ProbeOutcome, ProbeRequest, ResultSet};
use crate::probe::executor::{ProbeExecutor, probe};
use crate::reporting::logging::{log_batch_complete, log_batch_start, log_probe_result, log_warning};

/// Receives `(completed, total)` after every single completion.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Runs batches of probes against one executor.
pub struct Scheduler<E: ProbeExecutor + 'static> {
    executor: Arc<E>,
}

impl<E: ProbeExecutor + 'static> Scheduler<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Probe every URL and return one record per URL, in input order.
    ///
    /// URLs go to free workers in input order; at most `config.workers()`
    /// probes run at once. Per-URL failures end up as records, never as
    /// errors. The configuration is validated before anything is sent.
    /// When `cancel` is raised mid-batch the result is
    /// `ProbeError::Cancelled` and probes still running are abandoned.
    pub async fn run_batch(
        &self,
        urls: Vec<String>,
        config: &Config,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancelSignal,
    ) -> Result<ResultSet> {
        config.validate()?;

        let total = urls.len();
        if total == 0 {
            return Ok(ResultSet::default());
        }

        let headers = Arc::new(config.header_map()?);
        let timeout = config.timeout_duration();
        let delay = config.delay_duration();
        let workers = config.workers().min(total);

        log_batch_start(total, workers);
        let start_time = Instant::now();

        let requests: Vec<ProbeRequest> = urls
            .iter()
            .map(|url| ProbeRequest::new(url.as_str(), Arc::clone(&headers), timeout, delay))
            .collect();

        let executor = Arc::clone(&self.executor);
        let mut completed = 0;

        let completions = fan_out(requests, workers, cancel.clone(), move |_, request| {
            let executor = Arc::clone(&executor);
            async move { probe(executor.as_ref(), &request).await }
        })
        .map(|(index, joined)| {
            let outcome = joined.unwrap_or_else(|err| {
                log_warning(&format!("Probe of {} did not finish: {err}", urls[index]));
                ProbeOutcome::transport_error(&urls[index], error_messages::PROBE_PANICKED)
            });
            (index, outcome)
        })
        .inspect(|(index, outcome)| {
            completed += 1;
            log_probe_result(&urls[*index], outcome);
            if let Some(sink) = progress {
                sink.on_progress(completed, total);
            }
        });

        let aggregated = aggregate(completions, &urls).await;

        match aggregated {
            Ok(results) => {
                log_batch_complete(&summarize(&results), start_time.elapsed().as_millis());
                Ok(results)
            }
            Err(_) if cancel.is_cancelled() => {
                log_warning(&format!("Batch cancelled after {completed}/{total} URLs"));
                Err(ProbeError::Cancelled { completed, total })
            }
            Err(err) => Err(err),
        }
    }
}
