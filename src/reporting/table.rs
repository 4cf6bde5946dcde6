//! Tabular view of a result set
//!
//! Rows carry a fixed number of hop columns so every renderer (text, CSV,
//! JSON) sees the same shape. Longer chains are cut at `HOP_COLUMNS`; the
//! full chain stays available on the outcome itself.

use serde::Serialize;

use crate::core::constants::limits::HOP_COLUMNS;
use crate::core::types::{ResultRecord, ResultSet};
use crate::probe::classifier::outcome_icon;

/// One report row: URL, status, final URL and the first hop URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopRow {
    pub url: String,
    pub icon: &'static str,
    pub status: String,
    pub final_url: Option<String>,
    pub hops: [Option<String>; HOP_COLUMNS],
}

impl HopRow {
    pub fn from_record(record: &ResultRecord) -> Self {
        let outcome = &record.outcome;
        let mut hops: [Option<String>; HOP_COLUMNS] = Default::default();
        for (slot, hop) in hops.iter_mut().zip(&outcome.chain) {
            *slot = Some(hop.url.clone());
        }

        Self {
            url: record.url.clone(),
            icon: outcome_icon(outcome),
            status: outcome.status_label(),
            final_url: outcome.final_url().map(str::to_string),
            hops,
        }
    }

    /// Hop URLs that are filled
    pub fn filled_hops(&self) -> usize {
        self.hops.iter().filter(|hop| hop.is_some()).count()
    }
}

pub fn rows(results: &ResultSet) -> Vec<HopRow> {
    results.iter().map(HopRow::from_record).collect()
}

/// Column titles matching `HopRow`, without the icon.
pub fn column_headers() -> Vec<String> {
    let mut headers = vec![
        "URL".to_string(),
        "Status Code".to_string(),
        "Final URL".to_string(),
    ];
    headers.extend((1..=HOP_COLUMNS).map(|i| format!("Hop {i}")));
    headers
}

/// How many records share a status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub icon: &'static str,
    pub status: String,
    pub count: usize,
}

/// Status labels by frequency, most common first.
///
/// Ties keep the order in which the labels first appear.
pub fn status_distribution(results: &ResultSet) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();

    for record in results {
        let status = record.outcome.status_label();
        match counts.iter_mut().find(|entry| entry.status == status) {
            Some(entry) => entry.count += 1,
            None => counts.push(StatusCount {
                icon: outcome_icon(&record.outcome),
                status,
                count: 1,
            }),
        }
    }

    // Stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Records whose status label is one of `statuses`; all records when empty.
pub fn filter_by_status<'a>(results: &'a ResultSet, statuses: &[String]) -> Vec<&'a ResultRecord> {
    results
        .iter()
        .filter(|record| {
            statuses.is_empty()
                || statuses
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(&record.outcome.status_label()))
        })
        .collect()
}
