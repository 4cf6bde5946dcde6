use async_trait::async_trait;
use log::debug;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::core::constants::{error_messages, http_status, limits};
use crate::core::error::Result;
use crate::core::types::{ProbeOutcome, ProbeRequest, RedirectHop};

/// Resolves one URL to a classified outcome.
///
/// Implementations must not fail: every problem becomes an outcome kind.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn execute(&self, request: &ProbeRequest) -> ProbeOutcome;
}

/// Wait the request's pacing delay, then execute it.
pub async fn probe<E: ProbeExecutor + ?Sized>(executor: &E, request: &ProbeRequest) -> ProbeOutcome {
    if !request.delay.is_zero() {
        sleep(request.delay).await;
    }
    executor.execute(request).await
}

/// Executor backed by reqwest that records every redirect hop.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    max_redirects: usize,
}

enum ChainError {
    Timeout(String),
    Transport(String),
}

impl HttpExecutor {
    /// Build a client for a validated configuration.
    ///
    /// Redirects are never followed by the client itself: the executor
    /// walks them so each hop can be recorded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let workers = config.workers();
        let mut client_builder = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout_duration())
            .pool_max_idle_per_host(workers) // Limit idle connections per host
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60));

        if config.skip_ssl_verification.unwrap_or(false) {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = config.proxy {
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            client: client_builder.build()?,
            max_redirects: limits::MAX_REDIRECTS,
        })
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    async fn follow_chain(&self, request: &ProbeRequest) -> std::result::Result<Vec<RedirectHop>, ChainError> {
        let mut chain = Vec::new();
        let mut current = request.url.clone();

        loop {
            let response = self
                .client
                .get(&current)
                .headers((*request.headers).clone())
                .timeout(request.timeout)
                .send()
                .await
                .map_err(|err| classify_transport_error(&err))?;

            let status = response.status().as_u16();
            let requested = response.url().clone();
            debug!("hop {} {} -> {}", chain.len() + 1, requested, status);
            chain.push(RedirectHop::new(status, requested.as_str()));

            if !http_status::FOLLOWABLE_REDIRECTS.contains(&status) {
                return Ok(chain);
            }

            let next = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|location| requested.join(location).ok());

            match next {
                Some(next) if chain.len() > self.max_redirects => {
                    debug!("giving up on {} at {}", request.url, next);
                    return Err(ChainError::Transport(
                        error_messages::TOO_MANY_REDIRECTS.to_string(),
                    ));
                }
                Some(next) => current = next.to_string(),
                // Redirect status without a usable Location ends the chain
                None => return Ok(chain),
            }
        }
    }
}

#[async_trait]
impl ProbeExecutor for HttpExecutor {
    async fn execute(&self, request: &ProbeRequest) -> ProbeOutcome {
        let outcome = match tokio::time::timeout(request.timeout, self.follow_chain(request)).await {
            Ok(Ok(chain)) => ProbeOutcome::from_chain(&request.url, chain),
            Ok(Err(ChainError::Timeout(description))) => ProbeOutcome::timeout(&request.url, description),
            Ok(Err(ChainError::Transport(description))) => {
                ProbeOutcome::transport_error(&request.url, description)
            }
            Err(_) => ProbeOutcome::timeout(&request.url, error_messages::DEADLINE_ELAPSED),
        };

        debug!("{} -> {} ({} hop(s))", request.url, outcome.kind, outcome.chain.len());
        outcome
    }
}

fn classify_transport_error(err: &reqwest::Error) -> ChainError {
    let description = std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string());

    if err.is_timeout()
        || description.to_lowercase().contains(error_messages::TIMED_OUT)
        || err.to_string().to_lowercase().contains(error_messages::TIMED_OUT)
    {
        ChainError::Timeout(description)
    } else {
        ChainError::Transport(description)
    }
}
