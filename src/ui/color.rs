//! Colors and terminal capability detection

use crate::core::types::OutcomeKind;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Terminal color for an outcome class, matching its status icon
pub fn kind_color(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => Colors::GREEN,
        OutcomeKind::Redirect => Colors::YELLOW,
        OutcomeKind::ClientError => Colors::RED,
        OutcomeKind::ServerError => Colors::BRIGHT_RED,
        OutcomeKind::Timeout | OutcomeKind::TransportError | OutcomeKind::Unknown => {
            Colors::BRIGHT_BLACK
        }
    }
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    // Check if colors/emojis are explicitly disabled
    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Plain output under test
    if cfg!(test) {
        return false;
    }

    // Reports piped to a file or another program stay plain
    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        Err(_) => env::var("TERM_PROGRAM").is_ok(),
    }
}
