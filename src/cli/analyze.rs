//! Analyze command - run the full analysis and print a report

use crate::config::AnalyzerConfig;
use crate::models::{AnalysisResult, Severity};
use crate::pipeline::analyze_resources;
use crate::reporters::{self, OutputFormat, TextOptions};
use anyhow::{anyhow, Result};
use console::style;
use std::path::Path;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub fn run(
    input: &Path,
    format: Option<&str>,
    output_path: Option<&Path>,
    no_color: bool,
    fail_on: Option<String>,
    config: &AnalyzerConfig,
) -> Result<()> {
    let format_name = format
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    let format = OutputFormat::from_str(format_name).map_err(|e| anyhow!(e))?;

    let resources = super::read_input(input)?;
    info!("Analyzing {} resource(s) from {}", resources.len(), input.display());

    let analysis = analyze_resources(resources, config, &CancellationToken::new())?;

    let color = output_path.is_none()
        && !no_color
        && config.defaults.color.unwrap_or(true)
        && console::colors_enabled();
    let rendered = reporters::render(&analysis.report, format, &TextOptions { color })?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!(
                "{}Report written to: {}",
                style("📄 ").bold(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }

    check_fail_threshold(
        fail_on.or_else(|| config.defaults.fail_on.clone()).as_deref(),
        &analysis.result,
    )
}

/// Exit with code 1 if a non-compliant finding meets the threshold
fn check_fail_threshold(fail_on: Option<&str>, result: &AnalysisResult) -> Result<()> {
    let Some(threshold) = fail_on else {
        return Ok(());
    };
    let min = Severity::from_str(threshold).map_err(|e| anyhow!(e))?;
    let failing = result.violations_at_least(min).count();
    if failing > 0 {
        eprintln!(
            "Failing due to --fail-on={} threshold ({} finding(s))",
            threshold, failing
        );
        std::process::exit(1);
    }
    Ok(())
}
