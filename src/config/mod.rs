//! Configuration module for chartplan
//!
//! This module handles:
//! - Project-level configuration (chartplan.toml)
//! - Checker and pattern detector toggles
//! - Report limits
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config, load_config_file, normalize_name, AnalyzerConfig, CliDefaults, ReportConfig,
    ToggleOverride, CONFIG_FILE_NAMES, DEFAULT_VENDOR_API_GROUP, SAMPLE_CONFIG,
};
