//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Chart README files

use super::{ItemLevel, Report, ReportSection};

/// Render report as GitHub-flavored Markdown
pub fn render(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_toc(report));
    md.push('\n');

    for section in &report.sections {
        md.push_str(&render_section(section));
        md.push('\n');
    }

    md.push_str(&render_footer());
    md
}

fn render_header(report: &Report) -> String {
    format!(
        r#"# {}

| Primary Pattern | Strategy | Confidence |
|-----------------|----------|------------|
| `{}` | `{}` | {}% |

Generated: {}
"#,
        report.title, report.primary_pattern, report.strategy, report.confidence, report.generated_at
    )
}

fn render_toc(report: &Report) -> String {
    let mut md = String::from("## Table of Contents\n\n");
    for section in &report.sections {
        md.push_str(&format!("- [{}](#{})\n", section.title, anchor(&section.title)));
    }
    md
}

fn render_section(section: &ReportSection) -> String {
    let mut md = format!("## {}\n\n", section.title);
    for item in &section.items {
        md.push_str(&format!("- {} **{}**\n", level_emoji(item.level), item.title));
        for detail in &item.details {
            let detail = detail.trim_start();
            let detail = detail.strip_prefix("- ").unwrap_or(detail);
            md.push_str(&format!("  - {}\n", detail));
        }
    }
    md
}

fn render_footer() -> String {
    "---\n\n*Generated by chartplan*\n".to_string()
}

/// GitHub heading anchor
fn anchor(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' => Some(c),
            _ => None,
        })
        .collect()
}

fn level_emoji(level: ItemLevel) -> &'static str {
    match level {
        ItemLevel::Critical => "🔴",
        ItemLevel::Error => "🟠",
        ItemLevel::Warning => "🟡",
        ItemLevel::Success => "✅",
        ItemLevel::Info => "ℹ️",
    }
}
