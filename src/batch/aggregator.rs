use futures::{Stream, StreamExt};
use serde::Serialize;

use crate::batch::pool::OrderedCollector;
use crate::core::error::{ProbeError, Result};
use crate::core::types::{OutcomeKind, ProbeOutcome, ResultRecord, ResultSet};

/// Collect completions arriving in any order into a `ResultSet` ordered by
/// input index.
///
/// `urls` is the batch input; its length is the expected total. A
/// completion for an unknown or already-filled index, or a stream that ends
/// before every index arrived, is an aggregation error.
pub async fn aggregate<S>(completions: S, urls: &[String]) -> Result<ResultSet>
where
    S: Stream<Item = (usize, ProbeOutcome)>,
{
    let mut collector = OrderedCollector::new(urls.len());

    futures::pin_mut!(completions);
    while let Some((index, outcome)) = completions.next().await {
        let url = urls
            .get(index)
            .ok_or_else(|| {
                ProbeError::Aggregation(format!(
                    "index {index} is outside 0..{}",
                    urls.len()
                ))
            })?
            .clone();

        collector
            .insert(
                index,
                ResultRecord {
                    input_index: index,
                    url,
                    outcome,
                },
            )
            .map_err(|e| ProbeError::Aggregation(e.to_string()))?;
    }

    let records = collector
        .into_ordered()
        .map_err(|e| ProbeError::Aggregation(e.to_string()))?;

    Ok(ResultSet::from_ordered(records))
}

/// Counts per outcome class.
///
/// `error_count` covers completed exchanges answered with 4xx/5xx;
/// timeouts and transport failures are counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub success_count: usize,
    pub redirect_count: usize,
    pub error_count: usize,
    pub timeout_count: usize,
    pub transport_error_count: usize,
    pub unknown_count: usize,
}

impl Summary {
    /// Records that did not end in a 2xx
    pub fn failed_count(&self) -> usize {
        self.total - self.success_count
    }
}

pub fn summarize(results: &ResultSet) -> Summary {
    results.iter().fold(
        Summary {
            total: results.len(),
            ..Default::default()
        },
        |mut summary, record| {
            match record.outcome.kind {
                OutcomeKind::Success => summary.success_count += 1,
                OutcomeKind::Redirect => summary.redirect_count += 1,
                OutcomeKind::ClientError | OutcomeKind::ServerError => summary.error_count += 1,
                OutcomeKind::Timeout => summary.timeout_count += 1,
                OutcomeKind::TransportError => summary.transport_error_count += 1,
                OutcomeKind::Unknown => summary.unknown_count += 1,
            }
            summary
        },
    )
}
