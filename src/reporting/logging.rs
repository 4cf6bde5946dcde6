use crate::batch::aggregator::Summary;
use crate::config::Config;
use crate::core::types::ProbeOutcome;
use log::{debug, error, info, warn};
use std::io::Write;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // try_init: a second call (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let headers = match config.headers {
        Some(ref custom) => format!("{} custom", custom.len()),
        None => "browser defaults".to_string(),
    };

    info!(
        "Configuration: workers={}, delay={}ms, timeout={}ms",
        config.workers(),
        config.delay_duration().as_millis(),
        config.timeout_duration().as_millis()
    );
    info!("Headers: {headers}");
    info!(
        "HTTP: proxy={}, skip_ssl={}",
        config.proxy.as_deref().unwrap_or("none"),
        config.skip_ssl_verification.unwrap_or(false)
    );
}

pub fn log_batch_start(url_count: usize, workers: usize) {
    info!("Starting probe of {url_count} URLs with {workers} worker(s)");
}

/// Log individual probe results for debugging
pub fn log_probe_result(url: &str, outcome: &ProbeOutcome) {
    let hops = outcome.chain.len().saturating_sub(1);
    match (outcome.status_code, outcome.error.as_deref()) {
        (Some(status), _) if hops == 0 => debug!("{url} -> {status}"),
        (Some(status), _) => debug!(
            "{url} -> {status} via {hops} redirect(s), final {}",
            outcome.final_url().unwrap_or(url)
        ),
        (None, Some(desc)) => debug!("{url} -> {} ({desc})", outcome.kind),
        (None, None) => debug!("{url} -> {}", outcome.kind),
    }
}

pub fn log_batch_complete(summary: &Summary, duration_ms: u128) {
    if summary.failed_count() == 0 {
        info!(
            "✅ Probe complete: {}/{} URLs returned 2xx ({}ms)",
            summary.success_count, summary.total, duration_ms
        );
    } else {
        warn!(
            "Probe complete: {}/{} URLs returned 2xx, {} redirect(s), {} error(s), {} timeout(s), {} transport failure(s) ({}ms)",
            summary.success_count,
            summary.total,
            summary.redirect_count,
            summary.error_count,
            summary.timeout_count,
            summary.transport_error_count,
            duration_ms
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RedirectHop;
    use std::collections::BTreeMap;
    use std::io;

    #[test]
    fn test_logger_initialization_twice() {
        // Logger can only be installed once per process; later calls are no-ops
        init_logger(true, false);
        init_logger(false, true);
    }

    #[test]
    fn test_log_config_info_variants() {
        log_config_info(&Config::default());

        let mut headers = BTreeMap::new();
        headers.insert("X-Probe".to_string(), "1".to_string());
        let config = Config {
            headers: Some(headers),
            proxy: Some("http://proxy.test:8080".to_string()),
            skip_ssl_verification: Some(true),
            ..Default::default()
        };
        log_config_info(&config);

        let sparse = Config {
            max_workers: None,
            delay_ms: None,
            timeout_ms: None,
            skip_ssl_verification: None,
            ..Default::default()
        };
        log_config_info(&sparse);
    }

    #[test]
    fn test_log_probe_result_variants() {
        let direct = ProbeOutcome::from_chain("http://a.test", vec![RedirectHop::new(200, "http://a.test")]);
        log_probe_result("http://a.test", &direct);

        let redirected = ProbeOutcome::from_chain(
            "http://a.test",
            vec![
                RedirectHop::new(301, "http://a.test"),
                RedirectHop::new(200, "https://a.test"),
            ],
        );
        log_probe_result("http://a.test", &redirected);

        log_probe_result("http://b.test", &ProbeOutcome::timeout("http://b.test", "timed out"));

        let mut bare = ProbeOutcome::transport_error("http://c.test", "refused");
        bare.error = None;
        log_probe_result("http://c.test", &bare);
    }

    #[test]
    fn test_log_batch_complete_variants() {
        let clean = Summary {
            total: 3,
            success_count: 3,
            ..Default::default()
        };
        log_batch_complete(&clean, 120);

        let mixed = Summary {
            total: 5,
            success_count: 1,
            redirect_count: 1,
            error_count: 1,
            timeout_count: 1,
            transport_error_count: 1,
            unknown_count: 0,
        };
        log_batch_complete(&mixed, 0);
        log_batch_complete(&Summary::default(), 0);
    }

    #[test]
    fn test_log_error_and_warning() {
        log_batch_start(0, 1);
        log_batch_start(100, 20);

        let io_error = io::Error::new(io::ErrorKind::NotFound, "urls.txt missing");
        log_error("Failed to read input", Some(&io_error));
        log_error("Batch aborted", None);
        log_warning("");
        log_warning("Cancellation requested");
    }
}
