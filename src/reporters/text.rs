//! Text (terminal) reporter with optional colors

use super::{ItemLevel, Report};

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Emit ANSI escape codes
    pub color: bool,
}

/// Level colors
fn level_color(level: ItemLevel) -> &'static str {
    match level {
        ItemLevel::Critical => "\x1b[31m", // Red
        ItemLevel::Error => "\x1b[91m",    // Light red
        ItemLevel::Warning => "\x1b[33m",  // Yellow
        ItemLevel::Success => "\x1b[32m",  // Green
        ItemLevel::Info => "\x1b[34m",     // Blue
    }
}

/// Level tag
fn level_tag(level: ItemLevel) -> &'static str {
    match level {
        ItemLevel::Critical => "[C]",
        ItemLevel::Error => "[E]",
        ItemLevel::Warning => "[W]",
        ItemLevel::Success => "[+]",
        ItemLevel::Info => "[i]",
    }
}

/// Escape codes, blank when color is off
struct Palette {
    bold: &'static str,
    dim: &'static str,
    reset: &'static str,
    color: bool,
}

impl Palette {
    fn new(options: &TextOptions) -> Self {
        if options.color {
            Self {
                bold: BOLD,
                dim: DIM,
                reset: RESET,
                color: true,
            }
        } else {
            Self {
                bold: "",
                dim: "",
                reset: "",
                color: false,
            }
        }
    }

    fn level(&self, level: ItemLevel) -> &'static str {
        if self.color {
            level_color(level)
        } else {
            ""
        }
    }
}

/// Render report as formatted terminal output
pub fn render(report: &Report, options: &TextOptions) -> String {
    let p = Palette::new(options);
    let (bold, dim, reset) = (p.bold, p.dim, p.reset);
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{bold}{}{reset}\n", report.title));
    out.push_str(&format!(
        "{dim}──────────────────────────────────────{reset}\n"
    ));
    out.push_str(&format!(
        "Pattern: {bold}{}{reset}  Strategy: {bold}{}{reset}  Confidence: {bold}{}%{reset}\n",
        report.primary_pattern, report.strategy, report.confidence
    ));
    out.push_str(&format!("{dim}Generated {}{reset}\n\n", report.generated_at));

    for section in &report.sections {
        out.push_str(&format!("{bold}{}{reset}\n", section.title.to_uppercase()));
        for item in &section.items {
            let color = p.level(item.level);
            out.push_str(&format!(
                "  {color}{}{reset}  {}\n",
                level_tag(item.level),
                item.title
            ));
            for detail in &item.details {
                out.push_str(&format!("       {dim}{}{reset}\n", detail));
            }
        }
        out.push('\n');
    }

    out
}
