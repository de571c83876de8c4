//! Project-level configuration support
//!
//! Loads configuration from `chartplan.toml` or `.chartplanrc.json` in the
//! working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # chartplan.toml
//! vendor_api_group = "vendor.example.com"
//!
//! [checkers.image-policy]
//! enabled = false
//!
//! [patterns.operator]
//! enabled = false
//!
//! [report]
//! max_affected = 5
//! max_action_items = 10
//!
//! [defaults]
//! format = "markdown"
//! color = false
//! fail_on = "error"
//! ```
//!
//! Only the set of wired checkers and pattern detectors is configurable; the
//! thresholds they apply are fixed.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_VENDOR_API_GROUP: &str = "vendor.chartplan.io";

/// Config file names, searched in this order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["chartplan.toml", ".chartplanrc.json"];

/// Analyzer configuration loaded from chartplan.toml or similar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// API group whose resources count as vendor extensions
    #[serde(default = "default_vendor_api_group")]
    pub vendor_api_group: String,

    /// Per-checker toggles, keyed by checker name
    #[serde(default)]
    pub checkers: HashMap<String, ToggleOverride>,

    /// Per-pattern-detector toggles, keyed by detector name
    #[serde(default)]
    pub patterns: HashMap<String, ToggleOverride>,

    #[serde(default)]
    pub report: ReportConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            vendor_api_group: default_vendor_api_group(),
            checkers: HashMap::new(),
            patterns: HashMap::new(),
            report: ReportConfig::default(),
            defaults: CliDefaults::default(),
        }
    }
}

fn default_vendor_api_group() -> String {
    DEFAULT_VENDOR_API_GROUP.to_string()
}

/// Enable or disable one pluggable unit
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToggleOverride {
    /// Whether the unit is enabled (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Report truncation limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Affected resources listed per finding before "...and N more"
    #[serde(default = "default_max_affected")]
    pub max_affected: usize,

    /// Action items listed per priority bucket before "...and N more"
    #[serde(default = "default_max_action_items")]
    pub max_action_items: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_affected: default_max_affected(),
            max_action_items: default_max_action_items(),
        }
    }
}

fn default_max_affected() -> usize {
    5
}

fn default_max_action_items() -> usize {
    10
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown, summary)
    #[serde(default)]
    pub format: Option<String>,

    /// Colorize text output
    #[serde(default)]
    pub color: Option<bool>,

    /// Fail-on severity threshold for CI
    #[serde(default)]
    pub fail_on: Option<String>,
}

/// Load configuration from a directory.
///
/// Searches for `chartplan.toml`, then `.chartplanrc.json`. A file that
/// fails to parse is skipped with a warning. Returns defaults if nothing
/// usable is found.
pub fn load_config(dir: &Path) -> AnalyzerConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    AnalyzerConfig::default()
}

/// Load configuration from an explicit file; `.json` files are read as JSON,
/// anything else as TOML
pub fn load_config_file(path: &Path) -> Result<AnalyzerConfig> {
    let config_error = |message: String| AnalysisError::Config {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))
    } else {
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }
}

impl AnalyzerConfig {
    /// Check if a best-practice checker is enabled (defaults to true)
    pub fn is_checker_enabled(&self, name: &str) -> bool {
        is_enabled(&self.checkers, name)
    }

    /// Check if a pattern detector is enabled (defaults to true)
    pub fn is_pattern_enabled(&self, name: &str) -> bool {
        is_enabled(&self.patterns, name)
    }

    /// Names of every checker explicitly disabled
    pub fn disabled_checkers(&self) -> Vec<String> {
        let mut disabled: Vec<String> = self
            .checkers
            .iter()
            .filter(|(_, toggle)| toggle.enabled == Some(false))
            .map(|(name, _)| normalize_name(name))
            .collect();
        disabled.sort();
        disabled
    }
}

fn is_enabled(toggles: &HashMap<String, ToggleOverride>, name: &str) -> bool {
    let normalized = normalize_name(name);
    toggles
        .iter()
        .find(|(key, _)| normalize_name(key) == normalized)
        .and_then(|(_, toggle)| toggle.enabled)
        .unwrap_or(true)
}

/// Normalize a checker or detector name for config lookup
///
/// `ImagePolicyChecker`, `image_policy` and `image-policy` all become
/// `image-policy`.
pub fn normalize_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result
        .trim_end_matches("-checker")
        .trim_end_matches("-detector")
        .to_string()
}

/// Starter config written by `chartplan init`
pub const SAMPLE_CONFIG: &str = r#"# chartplan configuration

# Resources in this API group count as vendor extensions
vendor_api_group = "vendor.chartplan.io"

# Disable individual best-practice checkers
# [checkers.image-policy]
# enabled = false

# Disable individual pattern detectors
# [patterns.operator]
# enabled = false

[report]
# Affected resources listed per finding
max_affected = 5
# Action items listed per priority bucket
max_action_items = 10

[defaults]
# format = "text"   # text, json, markdown, summary
# color = true
# fail_on = "error" # info, warning, error, critical
"#;

#[cfg(test)]
mod tests;
