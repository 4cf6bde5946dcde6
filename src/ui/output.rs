//! Report rendering for urlprobe
//!
//! Every format renders to a `String` so the caller decides whether it
//! goes to stdout or to `--output FILE`.

use chrono::Utc;
use serde_json::json;
use std::fmt::Write;

use crate::batch::aggregator::{Summary, summarize};
use crate::core::constants::output_formats;
use crate::core::error::{ProbeError, Result};
use crate::core::types::{ResultRecord, ResultSet};
use crate::reporting::table::{HopRow, column_headers, filter_by_status, status_distribution};
use crate::ui::color::{Colors, colorize, kind_color};

/// Render `results` in `format`, listing only records matching
/// `status_filter` (all when empty). The summary always covers every record.
pub fn render_report(results: &ResultSet, format: &str, status_filter: &[String]) -> Result<String> {
    let summary = summarize(results);
    let shown = filter_by_status(results, status_filter);

    match format {
        output_formats::TEXT => Ok(render_text(results, &summary, &shown)),
        output_formats::JSON => render_json(&summary, &shown),
        output_formats::CSV => render_csv(&shown),
        other => Err(ProbeError::InvalidArgument(format!(
            "Unknown output format '{other}'. Expected one of: {}.",
            output_formats::ALL.join(", ")
        ))),
    }
}

/// Summary, status distribution and one line per URL with its hops
pub fn render_text(results: &ResultSet, summary: &Summary, shown: &[&ResultRecord]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", colorize("📊 Results", Colors::BOLD));
    let _ = writeln!(out, "  Total URLs:       {}", summary.total);
    let _ = writeln!(
        out,
        "  Success (2xx):    {}",
        colorize(&summary.success_count.to_string(), Colors::GREEN)
    );
    let _ = writeln!(
        out,
        "  Redirects (3xx):  {}",
        colorize(&summary.redirect_count.to_string(), Colors::YELLOW)
    );
    let _ = writeln!(
        out,
        "  Errors (4xx/5xx): {}",
        colorize(&summary.error_count.to_string(), Colors::RED)
    );
    if summary.timeout_count + summary.transport_error_count > 0 {
        let _ = writeln!(
            out,
            "  No response:      {} timeout(s), {} error(s)",
            summary.timeout_count, summary.transport_error_count
        );
    }

    let distribution = status_distribution(results);
    if !distribution.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", colorize("Status Code Distribution", Colors::BOLD));
        for entry in &distribution {
            let _ = writeln!(out, "  {} {:<8} {}", entry.icon, entry.status, entry.count);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ({}/{})",
        colorize("Detailed Results", Colors::BOLD),
        shown.len(),
        summary.total
    );
    for record in shown {
        let row = HopRow::from_record(record);
        let status = colorize(&format!("{:<7}", row.status), kind_color(record.outcome.kind));
        let _ = writeln!(out, "  {} {} {}", row.icon, status, row.url);

        // Only chains that went somewhere else are worth listing
        if record.outcome.chain.len() > 1 {
            for (hop, slot) in record.outcome.chain.iter().zip(row.hops.iter()) {
                if slot.is_some() {
                    let code = hop.status_code.map(|c| c.to_string()).unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "      {} {} {}",
                        colorize("→", Colors::DIM),
                        code,
                        hop.url
                    );
                }
            }
        }
        if let Some(ref error) = record.outcome.error {
            let _ = writeln!(out, "      {}", colorize(error, Colors::BRIGHT_BLACK));
        }
    }

    out
}

/// Structured report: timestamp, summary and the listed records
pub fn render_json(summary: &Summary, shown: &[&ResultRecord]) -> Result<String> {
    let results: Vec<serde_json::Value> = shown
        .iter()
        .map(|record| {
            let row = HopRow::from_record(record);
            json!({
                "input_index": record.input_index,
                "url": record.url,
                "kind": record.outcome.kind,
                "status": row.status,
                "status_code": record.outcome.status_code,
                "final_url": row.final_url,
                "chain": record.outcome.chain,
                "hops": row.hops,
                "error": record.outcome.error,
            })
        })
        .collect();

    let report = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "summary": summary,
        "results": results,
    });

    Ok(serde_json::to_string_pretty(&report)?)
}

/// `URL, Status Code, Final URL, Hop 1..Hop 5`, one row per listed record
pub fn render_csv(shown: &[&ResultRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(column_headers())?;

    for record in shown {
        let row = HopRow::from_record(record);
        let mut fields = vec![
            row.url.as_str(),
            row.status.as_str(),
            row.final_url.as_deref().unwrap_or(""),
        ];
        fields.extend(row.hops.iter().map(|hop| hop.as_deref().unwrap_or("")));
        writer.write_record(&fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ProbeError::Io(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| ProbeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}
