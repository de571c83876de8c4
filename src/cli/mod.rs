//! CLI command definitions and handlers

mod analyze;
mod graph;
mod init;

use crate::config::{load_config, load_config_file, AnalyzerConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// chartplan - packaging analysis for Kubernetes resource sets
#[derive(Parser, Debug)]
#[command(name = "chartplan")]
#[command(
    version,
    about = "Analyze a set of Kubernetes resources and recommend how to package them into charts",
    after_help = "\
Examples:
  chartplan analyze resources.json                  Text report
  chartplan analyze resources.json --format json    JSON for scripting
  chartplan analyze resources.json --fail-on error  Exit code 1 on error+ findings (CI mode)
  chartplan graph resources.json                    Show service groups and relationships
  chartplan init                                    Write a starter chartplan.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: chartplan.toml or .chartplanrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a chartplan.toml config file with example settings
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Analyze a resource set and print the report
    Analyze {
        /// JSON array of resources or manifests ("-" for stdin)
        input: PathBuf,

        /// Output format: text, json, markdown (or md), summary
        #[arg(long, short = 'f', value_parser = ["text", "txt", "json", "markdown", "md", "summary"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Disable colors in text output
        #[arg(long)]
        no_color: bool,

        /// Exit with code 1 if a non-compliant finding at or above this severity exists
        #[arg(long, value_parser = ["info", "warning", "error", "critical"])]
        fail_on: Option<String>,
    },

    /// Show service groups and relationships
    Graph {
        /// JSON array of resources or manifests ("-" for stdin)
        input: PathBuf,

        /// Print the whole graph as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Analyze {
            input,
            format,
            output,
            no_color,
            fail_on,
        } => analyze::run(
            &input,
            format.as_deref(),
            output.as_deref(),
            no_color,
            fail_on,
            &config,
        ),
        Commands::Graph { input, json } => graph::run(&input, json),
    }
}

fn resolve_config(explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config(Path::new("."))),
    }
}

/// Read resources from a file, or stdin for "-"
pub(crate) fn read_input(input: &Path) -> Result<Vec<crate::models::ProcessedResource>> {
    let content = if input == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };
    crate::input::parse_resources(&content)
        .with_context(|| format!("Invalid resource list in {}", input.display()))
}
