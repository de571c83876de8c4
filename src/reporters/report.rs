//! Report assembly
//!
//! Turns an [`AnalysisResult`] into five titled sections of leveled items.
//! Every formatter renders this structure; none of them looks at the result
//! directly.

use crate::config::ReportConfig;
use crate::models::{AnalysisResult, ArchitecturePattern, BestPractice, ChartStrategy, Severity};
use chrono::Utc;
use serde::Serialize;

pub const REPORT_TITLE: &str = "Chart Packaging Analysis";

pub const SECTION_OVERVIEW: &str = "Overview";
pub const SECTION_PATTERNS: &str = "Architecture Patterns";
pub const SECTION_BEST_PRACTICES: &str = "Best Practices";
pub const SECTION_STRATEGY: &str = "Packaging Strategy";
pub const SECTION_ACTIONS: &str = "Action Items";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemLevel {
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

impl From<Severity> for ItemLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => ItemLevel::Info,
            Severity::Warning => ItemLevel::Warning,
            Severity::Error => ItemLevel::Error,
            Severity::Critical => ItemLevel::Critical,
        }
    }
}

impl std::fmt::Display for ItemLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ItemLevel::Info => "info",
            ItemLevel::Success => "success",
            ItemLevel::Warning => "warning",
            ItemLevel::Error => "error",
            ItemLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub level: ItemLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ReportItem {
    pub fn new(level: ItemLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub items: Vec<ReportItem>,
}

/// Headline numbers used by the summary line
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReportTotals {
    pub services: usize,
    pub resources: usize,
    pub critical: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub compliant: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    /// RFC 3339
    pub generated_at: String,
    pub primary_pattern: ArchitecturePattern,
    pub strategy: ChartStrategy,
    pub confidence: u32,
    pub totals: ReportTotals,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// Assemble the five report sections
pub fn build_report(result: &AnalysisResult, limits: &ReportConfig) -> Report {
    Report {
        title: REPORT_TITLE.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        primary_pattern: result.primary_pattern,
        strategy: result.recommended_strategy,
        confidence: result.confidence,
        totals: totals(result),
        sections: vec![
            overview_section(result),
            patterns_section(result),
            best_practices_section(result, limits.max_affected),
            strategy_section(result),
            action_items_section(result, limits.max_action_items),
        ],
    }
}

/// Keep the first `max` lines and replace the rest with an "...and N more" marker
pub fn truncate_with_marker(mut lines: Vec<String>, max: usize) -> Vec<String> {
    if lines.len() > max {
        let hidden = lines.len() - max;
        lines.truncate(max);
        lines.push(format!("...and {} more", hidden));
    }
    lines
}

fn totals(result: &AnalysisResult) -> ReportTotals {
    let mut totals = ReportTotals {
        services: result.metrics.total_services,
        resources: result.metrics.total_resources,
        ..Default::default()
    };
    for finding in &result.best_practices {
        if finding.compliant {
            totals.compliant += 1;
            continue;
        }
        match finding.severity {
            Severity::Critical => totals.critical += 1,
            Severity::Error => totals.errors += 1,
            Severity::Warning => totals.warnings += 1,
            Severity::Info => totals.info += 1,
        }
    }
    totals
}

fn score_level(score: u32) -> ItemLevel {
    match score {
        s if s > 70 => ItemLevel::Warning,
        s if s <= 30 => ItemLevel::Success,
        _ => ItemLevel::Info,
    }
}

fn overview_section(result: &AnalysisResult) -> ReportSection {
    let m = &result.metrics;
    let mut items = vec![
        ReportItem::new(ItemLevel::Info, format!("Resources: {}", m.total_resources)).with_details(
            m.resources_by_kind
                .iter()
                .map(|(kind, count)| format!("{}: {}", kind, count))
                .collect(),
        ),
        ReportItem::new(ItemLevel::Info, format!("Services: {}", m.total_services)).with_details(
            vec![
                format!("{:.1} resources per service", m.avg_resources_per_service),
                format!(
                    "{} stateful, {} with ingress, {} with secrets",
                    m.stateful_services, m.services_with_ingress, m.services_with_secrets
                ),
            ],
        ),
        ReportItem::new(
            score_level(m.complexity_score),
            format!("Complexity: {}/100", m.complexity_score),
        ),
        ReportItem::new(
            score_level(m.coupling_score),
            format!("Coupling: {}/100", m.coupling_score),
        ),
    ];
    if m.vendor_resources > 0 {
        items.push(ReportItem::new(
            ItemLevel::Info,
            format!("Vendor resources: {}", m.vendor_resources),
        ));
    }
    ReportSection {
        title: SECTION_OVERVIEW.to_string(),
        items,
    }
}

fn patterns_section(result: &AnalysisResult) -> ReportSection {
    let mut items: Vec<ReportItem> = result
        .detected_patterns
        .iter()
        .map(|pattern| {
            let (level, title) = if *pattern == result.primary_pattern {
                (ItemLevel::Success, format!("{} (primary)", pattern))
            } else {
                (ItemLevel::Info, pattern.to_string())
            };
            ReportItem::new(level, title).with_details(vec![pattern.description().to_string()])
        })
        .collect();

    if !result.detected_patterns.contains(&result.primary_pattern) {
        items.insert(
            0,
            ReportItem::new(
                ItemLevel::Success,
                format!("{} (primary, inferred from metrics)", result.primary_pattern),
            )
            .with_details(vec![result.primary_pattern.description().to_string()]),
        );
    }

    ReportSection {
        title: SECTION_PATTERNS.to_string(),
        items,
    }
}

fn finding_level(finding: &BestPractice) -> ItemLevel {
    if finding.compliant {
        ItemLevel::Success
    } else {
        finding.severity.into()
    }
}

fn best_practices_section(result: &AnalysisResult, max_affected: usize) -> ReportSection {
    let mut items: Vec<ReportItem> = result
        .best_practices
        .iter()
        .map(|finding| {
            let mut details = vec![finding.description.clone()];
            let affected = finding
                .affected_resources
                .iter()
                .map(|key| format!("  - {}", key))
                .collect();
            details.push(format!("Affected ({}):", finding.affected_resources.len()));
            details.extend(truncate_with_marker(affected, max_affected));
            if finding.auto_fixable {
                details.push("Auto-fixable".to_string());
            }
            ReportItem::new(finding_level(finding), &finding.title).with_details(details)
        })
        .collect();

    if items.is_empty() {
        items.push(ReportItem::new(ItemLevel::Success, "No best-practice findings"));
    }
    ReportSection {
        title: SECTION_BEST_PRACTICES.to_string(),
        items,
    }
}

fn strategy_section(result: &AnalysisResult) -> ReportSection {
    let strategy = result.recommended_strategy;
    let mut items = vec![ReportItem::new(ItemLevel::Success, strategy.to_string()).with_details(
        vec![
            strategy.description().to_string(),
            format!("Confidence: {}%", result.confidence),
        ],
    )];
    items.extend(result.recommendations.iter().map(|rec| {
        ReportItem::new(ItemLevel::Info, format!("[P{}] {}", rec.priority, rec.title))
            .with_details(vec![rec.description.clone()])
    }));
    ReportSection {
        title: SECTION_STRATEGY.to_string(),
        items,
    }
}

fn action_items_section(result: &AnalysisResult, max_items: usize) -> ReportSection {
    let buckets: [(&str, ItemLevel, &[Severity]); 3] = [
        ("High Priority", ItemLevel::Error, &[Severity::Critical, Severity::Error]),
        ("Medium Priority", ItemLevel::Warning, &[Severity::Warning]),
        ("Low Priority", ItemLevel::Info, &[Severity::Info]),
    ];

    let mut items = Vec::new();
    for (title, level, severities) in buckets {
        let actions: Vec<String> = result
            .best_practices
            .iter()
            .filter(|f| !f.compliant && severities.contains(&f.severity))
            .flat_map(|f| f.recommendations.iter().cloned())
            .collect();
        if actions.is_empty() {
            continue;
        }
        items.push(ReportItem::new(level, title).with_details(truncate_with_marker(actions, max_items)));
    }

    if items.is_empty() {
        items.push(ReportItem::new(ItemLevel::Success, "No action items"));
    }
    ReportSection {
        title: SECTION_ACTIONS.to_string(),
        items,
    }
}
