//! Output reporters for chartplan analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output, optionally colorized
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown
//! - `summary` - A single line for CI logs

mod json;
mod markdown;
mod report;
mod summary;
mod text;

pub use report::{
    build_report, truncate_with_marker, ItemLevel, Report, ReportItem, ReportSection,
    ReportTotals, REPORT_TITLE, SECTION_ACTIONS, SECTION_BEST_PRACTICES, SECTION_OVERVIEW,
    SECTION_PATTERNS, SECTION_STRATEGY,
};
pub use text::TextOptions;

use crate::error::Result;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(format!(
                "Unknown format '{}'. Valid formats: text, json, markdown, summary",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Render a report in the given format; only JSON can fail
pub fn render(report: &Report, format: OutputFormat, options: &TextOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report, options)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => Ok(markdown::render(report)),
        OutputFormat::Summary => Ok(summary::render(report)),
    }
}
