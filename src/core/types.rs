use reqwest::header::HeaderMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::constants::labels;
use crate::probe::classifier::classify;

/// One probe to perform: everything the executor needs, fixed at dispatch.
///
/// Headers are shared by every request of a batch, hence the `Arc`.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: String,
    pub headers: Arc<HeaderMap>,
    pub timeout: Duration,
    pub delay: Duration,
}

impl ProbeRequest {
    pub fn new(url: impl Into<String>, headers: Arc<HeaderMap>, timeout: Duration, delay: Duration) -> Self {
        Self {
            url: url.into(),
            headers,
            timeout,
            delay,
        }
    }
}

/// One response (or failed attempt) seen while resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHop {
    /// Status of the response, `None` when no response arrived
    pub status_code: Option<u16>,
    /// URL that was requested for this hop
    pub url: String,
}

impl RedirectHop {
    pub fn new(status_code: u16, url: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            url: url.into(),
        }
    }

    /// The degenerate hop recorded when a request never got a response.
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            status_code: None,
            url: url.into(),
        }
    }
}

/// Classified bucket of a completed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Redirect,
    ClientError,
    ServerError,
    Timeout,
    TransportError,
    /// A status outside every known class (e.g. 1xx as a final status)
    Unknown,
}

impl OutcomeKind {
    /// 4xx and 5xx: a completed exchange the server answered with an error
    pub fn is_http_error(&self) -> bool {
        matches!(self, OutcomeKind::ClientError | OutcomeKind::ServerError)
    }

    /// No response at all
    pub fn is_network_failure(&self) -> bool {
        matches!(self, OutcomeKind::Timeout | OutcomeKind::TransportError)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Redirect => "redirect",
            OutcomeKind::ClientError => "client error",
            OutcomeKind::ServerError => "server error",
            OutcomeKind::Timeout => "timeout",
            OutcomeKind::TransportError => "transport error",
            OutcomeKind::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Classified result of one probe.
///
/// `chain` is never empty: failures carry a single hop with no status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub kind: OutcomeKind,
    pub status_code: Option<u16>,
    pub chain: Vec<RedirectHop>,
    /// Transport error description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeOutcome {
    /// Build the outcome of a completed exchange from its hops.
    ///
    /// The last hop is the terminal response and decides the kind. An empty
    /// chain or a terminal hop without status is a transport error.
    pub fn from_chain(url: &str, chain: Vec<RedirectHop>) -> Self {
        match chain.last().and_then(|hop| hop.status_code) {
            Some(status) => Self {
                kind: classify(status),
                status_code: Some(status),
                chain,
                error: None,
            },
            None => Self::transport_error(url, "response chain without a status"),
        }
    }

    pub fn timeout(url: &str, description: impl Into<String>) -> Self {
        Self::failed(OutcomeKind::Timeout, url, description.into())
    }

    pub fn transport_error(url: &str, description: impl Into<String>) -> Self {
        Self::failed(OutcomeKind::TransportError, url, description.into())
    }

    fn failed(kind: OutcomeKind, url: &str, description: String) -> Self {
        Self {
            kind,
            status_code: None,
            chain: vec![RedirectHop::failed(url)],
            error: Some(description),
        }
    }

    /// URL of the terminal hop
    pub fn final_url(&self) -> Option<&str> {
        self.chain.last().map(|hop| hop.url.as_str())
    }

    /// Status as shown in reports: the code, `Timeout` or `Error`.
    pub fn status_label(&self) -> String {
        match (self.status_code, self.kind) {
            (Some(code), _) => code.to_string(),
            (None, OutcomeKind::Timeout) => labels::TIMEOUT.to_string(),
            (None, _) => labels::ERROR.to_string(),
        }
    }
}

/// Outcome of one input URL, keyed by its position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub input_index: usize,
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// One record per input URL, ordered by `input_index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    /// Callers guarantee `records[i].input_index == i`; the aggregator is
    /// the only producer.
    pub(crate) fn from_ordered(records: Vec<ResultRecord>) -> Self {
        debug_assert!(records
            .iter()
            .enumerate()
            .all(|(i, record)| record.input_index == i));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
