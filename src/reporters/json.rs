//! JSON reporter
//!
//! Outputs the full report as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use super::Report;
use crate::error::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
