//! URL list input
//!
//! Turns raw text (files, stdin, `--url` values) into the clean ordered
//! list the scheduler expects: trimmed, no blank entries, no duplicates.

use rustc_hash::FxHashSet;
use std::fs;
use std::io::Read;

use crate::core::constants::files;
use crate::core::error::{ProbeError, Result};

/// Trim, drop blanks and drop repeats, keeping the first occurrence.
pub fn normalize_urls<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    let mut urls = Vec::new();

    for line in lines {
        let url = line.as_ref().trim();
        if url.is_empty() {
            continue;
        }
        if seen.insert(url.to_string()) {
            urls.push(url.to_string());
        }
    }

    urls
}

/// Read every source in order: files, `-` for stdin, then the inline URLs.
pub fn collect_urls(sources: &[String], inline: &[String]) -> Result<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();

    for source in sources {
        let text = if source == files::STDIN_MARKER {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            fs::read_to_string(source).map_err(|e| {
                ProbeError::InvalidArgument(format!("Could not read URL list '{source}': {e}"))
            })?
        };
        lines.extend(text.lines().map(str::to_string));
    }

    lines.extend(inline.iter().cloned());
    Ok(normalize_urls(lines))
}
