use clap::{CommandFactory, Parser};
use urlprobe::batch::{CancelSignal, ProgressSink, Scheduler, summarize};
use urlprobe::config::{CliConfig, Config};
use urlprobe::core::constants::{exit_codes, output_formats};
use urlprobe::core::{ProbeError, ResultSet};
use urlprobe::probe::HttpExecutor;
use urlprobe::reporting::logging;
use urlprobe::ui::ProgressReporter;
use urlprobe::ui::completion::print_completions;
use urlprobe::ui::{Cli, Commands, cli_to_config, collect_urls, render_report};

use std::fs;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    if cli.files.is_empty() && cli.urls.is_empty() {
        eprintln!("Error: No URLs provided");
        eprintln!("\nPass URL list files, '-' for stdin, or --url.");
        eprintln!("For more information, try '--help'.");
        std::process::exit(exit_codes::ERROR);
    }

    match run_urlprobe_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(exit_codes::SUCCESS)
        }
        None => None,
    }
}

/// Read input, probe every URL and write the report
pub async fn run_urlprobe_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli)?;
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    let urls = collect_urls(&cli.files, &cli.urls).inspect_err(|e| {
        logging::log_error("Could not read URL input", Some(e));
    })?;
    if urls.is_empty() {
        let error = "No URLs found in the given input";
        logging::log_error(error, None);
        return Err(error.into());
    }

    // Reject bad ranges and malformed headers before building a client
    config.validate()?;
    logging::log_config_info(&config);

    let scheduler = Scheduler::new(HttpExecutor::from_config(&config)?);
    let cancel = install_ctrl_c_handler();

    let mut progress = create_progress_reporter(&output_settings);
    if let Some(ref mut reporter) = progress {
        reporter.start_probing(urls.len());
    }

    let sink = progress.as_ref().map(|reporter| reporter as &dyn ProgressSink);
    let outcome = scheduler.run_batch(urls, &config, sink, &cancel).await;

    finalize_progress_reporter(progress, &outcome);

    let exit_code = determine_exit_code(&outcome);
    match outcome {
        Ok(results) => {
            write_report(&results, &output_settings, &cli_config.status_filter)?;
            Ok(exit_code)
        }
        Err(ProbeError::Cancelled { completed, total }) => {
            eprintln!("Cancelled after {completed}/{total} URLs; no report written");
            Ok(exit_code)
        }
        Err(e) => Err(e.into()),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(&format!("Could not load config file '{config_file}'"), Some(e));
        })?
    } else {
        Config::load_from_standard_locations()?
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Settings for output formatting and display
#[derive(Debug)]
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub output_path: Option<String>,
    pub show_progress: bool,
}

impl OutputSettings {
    /// The progress bar would interleave with a structured report on stdout
    pub fn progress_allowed(&self) -> bool {
        self.output_path.is_some() || self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;

    OutputSettings {
        quiet,
        verbose: config.verbose.unwrap_or(false),
        output_format: config
            .output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
            .to_string(),
        output_path: cli_config.output_path.clone(),
        show_progress: !quiet && !cli_config.no_progress,
    }
}

/// Raise the returned signal on Ctrl-C
pub fn install_ctrl_c_handler() -> CancelSignal {
    let cancel = CancelSignal::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logging::log_warning("Interrupted, cancelling batch");
            trigger.cancel();
        }
    });
    cancel
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress && output_settings.progress_allowed() {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(
    progress: Option<ProgressReporter>,
    outcome: &urlprobe::Result<ResultSet>,
) {
    if let Some(ref progress) = progress {
        if let Ok(results) = outcome {
            let summary = summarize(results);
            progress.finish_probing(summary.success_count, summary.total);
        }
        progress.finish_and_clear();
    }
}

/// Render the report and send it to `--output` or stdout
pub fn write_report(
    results: &ResultSet,
    output_settings: &OutputSettings,
    status_filter: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let report = render_report(results, &output_settings.output_format, status_filter)?;

    match output_settings.output_path {
        Some(ref path) => {
            fs::write(path, &report).inspect_err(|e| {
                logging::log_error(&format!("Could not write report to '{path}'"), Some(e));
            })?;
            if !output_settings.quiet {
                eprintln!("📥 Report written to {path}");
            }
        }
        None => print!("{report}"),
    }

    Ok(())
}

/// 0 when every URL was probed, 130 when interrupted, 1 otherwise
pub fn determine_exit_code(outcome: &urlprobe::Result<ResultSet>) -> i32 {
    match outcome {
        Ok(_) => exit_codes::SUCCESS,
        Err(ProbeError::Cancelled { .. }) => exit_codes::CANCELLED,
        Err(_) => exit_codes::ERROR,
    }
}
