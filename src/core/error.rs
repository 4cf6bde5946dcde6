use std::fmt;

/// Error types for urlprobe operations.
///
/// Per-URL network failures are never represented here: they become
/// classified outcomes. These are the failures that stop a batch from
/// being dispatched at all, or that end it early.
#[derive(Debug)]
pub enum ProbeError {
    /// IO error (reading URL lists, writing reports)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON parsing or encoding error
    Json(serde_json::Error),

    /// CSV encoding error
    Csv(csv::Error),

    /// Header name or value that cannot be sent
    InvalidHeader(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Completions could not be assembled into a result set
    Aggregation(String),

    /// The batch was aborted before every URL completed
    Cancelled { completed: usize, total: usize },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Io(err) => write!(f, "IO error: {err}"),
            ProbeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ProbeError::Http(err) => write!(f, "HTTP error: {err}"),
            ProbeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ProbeError::Json(err) => write!(f, "JSON error: {err}"),
            ProbeError::Csv(err) => write!(f, "CSV error: {err}"),
            ProbeError::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            ProbeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            ProbeError::Aggregation(msg) => write!(f, "Aggregation error: {msg}"),
            ProbeError::Cancelled { completed, total } => {
                write!(f, "Cancelled: batch aborted after {completed}/{total} URLs")
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Io(err) => Some(err),
            ProbeError::Http(err) => Some(err),
            ProbeError::TomlParsing(err) => Some(err),
            ProbeError::Json(err) => Some(err),
            ProbeError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::Io(err)
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Http(err)
    }
}

impl From<toml::de::Error> for ProbeError {
    fn from(err: toml::de::Error) -> Self {
        ProbeError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Json(err)
    }
}

impl From<csv::Error> for ProbeError {
    fn from(err: csv::Error) -> Self {
        ProbeError::Csv(err)
    }
}

/// Type alias for Results using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = ProbeError::Config("max_workers out of range".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: max_workers out of range"
        );

        let cancelled = ProbeError::Cancelled {
            completed: 3,
            total: 10,
        };
        assert_eq!(
            format!("{cancelled}"),
            "Cancelled: batch aborted after 3/10 URLs"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let probe_error = ProbeError::from(io_error);

        match probe_error {
            ProbeError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let probe_error = ProbeError::from(toml_error);

        assert!(matches!(probe_error, ProbeError::TomlParsing(_)));
        assert!(probe_error.source().is_some());
        assert!(format!("{probe_error}").contains("TOML parsing error:"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let probe_error = ProbeError::from(json_error);

        assert!(matches!(probe_error, ProbeError::Json(_)));
        assert!(probe_error.source().is_some());
    }

    #[test]
    fn test_error_from_reqwest() {
        let reqwest_error = reqwest::Client::new().get("not a url").build().unwrap_err();
        let probe_error = ProbeError::from(reqwest_error);

        assert!(matches!(probe_error, ProbeError::Http(_)));
        assert!(format!("{probe_error}").contains("HTTP error:"));
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            ProbeError::Config("test".to_string()),
            ProbeError::InvalidHeader("test".to_string()),
            ProbeError::InvalidArgument("test".to_string()),
            ProbeError::Aggregation("test".to_string()),
            ProbeError::Cancelled {
                completed: 0,
                total: 1,
            },
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(format!("{error}").contains(':'));
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProbeError>();
    }
}
