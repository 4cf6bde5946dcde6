//! Application-wide constants to avoid magic values throughout the codebase.

/// Output format constants
pub mod output_formats {
    /// Text output format - summary, distribution and per-URL table
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// CSV output format - one row per URL with a fixed hop list
    pub const CSV: &str = "csv";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, CSV];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 301 Moved Permanently - permanent redirect
    pub const MOVED_PERMANENTLY: u16 = 301;
    /// HTTP 302 Found - temporary redirect
    pub const FOUND: u16 = 302;
    /// HTTP 303 See Other
    pub const SEE_OTHER: u16 = 303;
    /// HTTP 307 Temporary Redirect
    pub const TEMPORARY_REDIRECT: u16 = 307;
    /// HTTP 308 Permanent Redirect
    pub const PERMANENT_REDIRECT: u16 = 308;

    /// Statuses that carry a `Location` header worth following
    pub const FOLLOWABLE_REDIRECTS: [u16; 5] = [
        MOVED_PERMANENTLY,
        FOUND,
        SEE_OTHER,
        TEMPORARY_REDIRECT,
        PERMANENT_REDIRECT,
    ];
}

/// Limits and defaults for the batch configuration record
pub mod limits {
    /// Minimum number of concurrent workers
    pub const MIN_WORKERS: usize = 1;
    /// Maximum number of concurrent workers
    pub const MAX_WORKERS: usize = 20;
    /// Default number of concurrent workers
    pub const DEFAULT_WORKERS: usize = 10;

    /// Maximum pre-request delay in milliseconds
    pub const MAX_DELAY_MS: u64 = 2000;
    /// Default pre-request delay in milliseconds
    pub const DEFAULT_DELAY_MS: u64 = 100;

    /// Minimum per-probe timeout in milliseconds
    pub const MIN_TIMEOUT_MS: u64 = 5_000;
    /// Maximum per-probe timeout in milliseconds
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
    /// Default per-probe timeout in milliseconds
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    /// Redirects followed before a probe is reported as a transport error
    pub const MAX_REDIRECTS: usize = 10;
    /// Hop columns in the rendered report
    pub const HOP_COLUMNS: usize = 5;
}

/// Default request headers: a desktop browser signature
pub mod headers {
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
    pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";
    pub const DNT: &str = "1";
    pub const CONNECTION: &str = "keep-alive";
    pub const UPGRADE_INSECURE_REQUESTS: &str = "1";

    /// Header names and values in the order a browser sends them
    pub const DEFAULT_SET: [(&str, &str); 7] = [
        ("User-Agent", USER_AGENT),
        ("Accept", ACCEPT),
        ("Accept-Language", ACCEPT_LANGUAGE),
        ("Accept-Encoding", ACCEPT_ENCODING),
        ("DNT", DNT),
        ("Connection", CONNECTION),
        ("Upgrade-Insecure-Requests", UPGRADE_INSECURE_REQUESTS),
    ];
}

/// Status labels used when there is no numeric status
pub mod labels {
    /// Label for probes that ran out of time
    pub const TIMEOUT: &str = "Timeout";
    /// Label for transport failures
    pub const ERROR: &str = "Error";
}

/// Error message constants
pub mod error_messages {
    /// Fragment of timeout errors surfaced by the HTTP stack
    pub const TIMED_OUT: &str = "timed out";
    /// Description for probes exceeding their overall deadline
    pub const DEADLINE_ELAPSED: &str = "operation timed out";
    /// Description for redirect loops longer than the limit
    pub const TOO_MANY_REDIRECTS: &str = "too many redirects";
    /// Description for a probe task that panicked
    pub const PROBE_PANICKED: &str = "probe task panicked";
}

/// Display and formatting constants
pub mod display {
    /// Icon for 2xx responses
    pub const SUCCESS_ICON: &str = "🟢";
    /// Icon for 3xx responses
    pub const REDIRECT_ICON: &str = "🟡";
    /// Icon for 4xx responses
    pub const CLIENT_ERROR_ICON: &str = "🟠";
    /// Icon for 5xx responses
    pub const SERVER_ERROR_ICON: &str = "🔴";
    /// Icon for everything else (timeouts, transport errors, odd codes)
    pub const OTHER_ICON: &str = "⚪";
}

/// Config file lookup
pub mod files {
    /// Config file name looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".urlprobe.toml";
    /// Parent directories searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
    /// Argument that stands for standard input
    pub const STDIN_MARKER: &str = "-";
}

/// Process exit codes
pub mod exit_codes {
    /// Every URL was probed (whatever the statuses)
    pub const SUCCESS: i32 = 0;
    /// Bad input, bad configuration or I/O failure
    pub const ERROR: i32 = 1;
    /// Interrupted with Ctrl-C
    pub const CANCELLED: i32 = 130;
}
