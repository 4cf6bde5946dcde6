// Command-line interface definitions and parsing for urlprobe

use crate::config::{CliConfig, Config};
use crate::core::constants::output_formats;
use crate::core::error::{ProbeError, Result};
use clap::{Parser, Subcommand};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files with one URL per line ("-" reads stdin)
    pub files: Vec<String>,

    /// URL to probe (repeatable)
    #[arg(short = 'u', long = "url", value_name = "URL", help_heading = "Input")]
    pub urls: Vec<String>,

    // Batch Options
    /// Concurrent probes, 1-20 (default: 10)
    #[arg(short = 'w', long, value_name = "COUNT", help_heading = "Batch Options")]
    pub workers: Option<usize>,

    /// Delay before each request in ms, 0-2000 (default: 100)
    #[arg(short = 'd', long, value_name = "MS", help_heading = "Batch Options")]
    pub delay: Option<u64>,

    /// Per-URL timeout in ms, 5000-60000 (default: 10000)
    #[arg(short = 't', long, value_name = "MS", help_heading = "Batch Options")]
    pub timeout: Option<u64>,

    // Headers
    /// Custom headers as a JSON object, replacing the browser defaults
    #[arg(long, value_name = "JSON", conflicts_with = "headers_file", help_heading = "Headers")]
    pub headers_json: Option<String>,

    /// File containing custom headers as a JSON object
    #[arg(long, value_name = "FILE", help_heading = "Headers")]
    pub headers_file: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE", help_heading = "Output & Verbosity")]
    pub output: Option<String>,

    /// Only list URLs with these statuses (e.g. 404,Timeout,Error)
    #[arg(long, value_name = "STATUSES", value_delimiter = ',', help_heading = "Output & Verbosity")]
    pub status: Vec<String>,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network & Security")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert parsed CLI arguments into a CliConfig.
///
/// Reads the headers file if one was given. Range checks are left to
/// `Config::validate` so file and CLI values are checked the same way.
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let headers = match (&cli.headers_json, &cli.headers_file) {
        (Some(json), _) => Some(Config::headers_from_json(json)?),
        (None, Some(path)) => {
            let json = fs::read_to_string(path).map_err(|e| {
                ProbeError::Config(format!("Could not read headers file '{path}': {e}"))
            })?;
            Some(Config::headers_from_json(&json)?)
        }
        (None, None) => None,
    };

    let status_filter = cli
        .status
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(CliConfig {
        max_workers: cli.workers,
        delay_ms: cli.delay,
        timeout_ms: cli.timeout,
        headers,
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        output_path: cli.output.clone(),
        status_filter,
        proxy: cli.proxy.clone(),
        skip_ssl_verification: cli.insecure,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    })
}
