//! Configuration management
//!
//! This module handles loading and managing the batch configuration from
//! TOML files, JSON header sets and CLI arguments.

use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{files, headers, limits, output_formats};
use crate::core::error::{ProbeError, Result};

/// The browser-like header set sent when no custom headers are configured.
pub static DEFAULT_HEADERS: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    headers::DEFAULT_SET
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of probes in flight at once
    pub max_workers: Option<usize>,

    /// Delay before each request in milliseconds
    pub delay_ms: Option<u64>,

    /// Per-probe timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// Request headers; replaces the default browser set as a whole.
    ///
    /// The HTTP client still fills in `Accept: */*` and `Accept-Encoding`
    /// when a custom set leaves them out.
    pub headers: Option<BTreeMap<String, String>>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// Output format (text, json, csv)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_workers: Some(limits::DEFAULT_WORKERS),
            delay_ms: Some(limits::DEFAULT_DELAY_MS),
            timeout_ms: Some(limits::DEFAULT_TIMEOUT_MS),
            headers: None, // Default browser header set
            proxy: None,
            skip_ssl_verification: Some(false),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProbeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ProbeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Find a config file in the current directory or up to three parents.
    ///
    /// A file that exists but does not parse is an error, not a fallback.
    pub fn load_from_standard_locations() -> Result<Self> {
        match Self::find_standard_location() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn find_standard_location() -> Option<PathBuf> {
        (0..=files::CONFIG_SEARCH_DEPTH)
            .map(|depth| PathBuf::from(format!("{}{}", "../".repeat(depth), files::CONFIG_FILE_NAME)))
            .find(|path| path.is_file())
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Batch options
        if let Some(max_workers) = cli_config.max_workers {
            self.max_workers = Some(max_workers);
        }
        if let Some(delay_ms) = cli_config.delay_ms {
            self.delay_ms = Some(delay_ms);
        }
        if let Some(timeout_ms) = cli_config.timeout_ms {
            self.timeout_ms = Some(timeout_ms);
        }
        if let Some(ref headers) = cli_config.headers {
            self.headers = Some(headers.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        // Network & security
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
    }

    /// Parse a JSON object of header names to values.
    ///
    /// Numbers and booleans are accepted and sent as their text form.
    pub fn headers_from_json(json: &str) -> Result<BTreeMap<String, String>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or_else(|| {
            ProbeError::Config("Custom headers must be a JSON object of name/value pairs".to_string())
        })?;

        object
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(ProbeError::Config(format!(
                            "Header '{name}' has a non-scalar value: {other}"
                        )));
                    }
                };
                Ok((name.clone(), text))
            })
            .collect()
    }

    /// Headers actually sent: the configured set, or the browser defaults.
    pub fn effective_headers(&self) -> &BTreeMap<String, String> {
        self.headers.as_ref().unwrap_or(&*DEFAULT_HEADERS)
    }

    /// Build the header map sent with every request.
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.effective_headers().len());
        for (name, value) in self.effective_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ProbeError::InvalidHeader(format!("'{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ProbeError::InvalidHeader(format!("value of '{name}': {e}")))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Maximum number of concurrent probes
    pub fn workers(&self) -> usize {
        self.max_workers.unwrap_or(limits::DEFAULT_WORKERS)
    }

    /// Get pre-request delay as Duration
    pub fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay_ms.unwrap_or(limits::DEFAULT_DELAY_MS))
    }

    /// Get per-probe timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(limits::DEFAULT_TIMEOUT_MS))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.max_workers
            && !(limits::MIN_WORKERS..=limits::MAX_WORKERS).contains(&workers)
        {
            return Err(ProbeError::Config(format!(
                "Worker count {workers} is out of range. Expected a value between {}-{}.",
                limits::MIN_WORKERS,
                limits::MAX_WORKERS
            )));
        }

        if let Some(delay) = self.delay_ms
            && delay > limits::MAX_DELAY_MS
        {
            return Err(ProbeError::Config(format!(
                "Delay of {delay}ms is out of range. Expected a value between 0-{}.",
                limits::MAX_DELAY_MS
            )));
        }

        if let Some(timeout) = self.timeout_ms
            && !(limits::MIN_TIMEOUT_MS..=limits::MAX_TIMEOUT_MS).contains(&timeout)
        {
            return Err(ProbeError::Config(format!(
                "Timeout of {timeout}ms is out of range. Expected a value between {}-{}.",
                limits::MIN_TIMEOUT_MS,
                limits::MAX_TIMEOUT_MS
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(ProbeError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref proxy) = self.proxy {
            reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| ProbeError::Config(format!("Invalid proxy URL '{proxy}': {e}")))?;
        }

        // Malformed custom headers are rejected here, before any request
        self.header_map()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Batch options
    pub max_workers: Option<usize>,                // --workers
    pub delay_ms: Option<u64>,                     // --delay
    pub timeout_ms: Option<u64>,                   // --timeout
    pub headers: Option<BTreeMap<String, String>>, // --headers-json / --headers-file

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress
    pub output_path: Option<String>,   // --output
    pub status_filter: Vec<String>,    // --status

    // Network & security
    pub proxy: Option<String>,       // --proxy
    pub skip_ssl_verification: bool, // --insecure

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
