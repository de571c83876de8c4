//! Analysis pipeline
//!
//! Orchestrates a full analysis run:
//! 1. Build the relationship graph and group resources into services
//! 2. Compute metrics
//! 3. Detect architecture patterns
//! 4. Run best-practice checkers
//! 5. Recommend a packaging strategy
//! 6. Assemble the report
//!
//! Every step after graph construction is read-only over the finished graph.

use crate::checkers::{self, BestPracticeChecker};
use crate::config::AnalyzerConfig;
use crate::detectors::{self, PatternDetector, PatternEngine};
use crate::error::Result;
use crate::graph::{default_graph_builder, ResourceGraph};
use crate::models::{AnalysisResult, ProcessedResource};
use crate::reporters::{build_report, Report};
use crate::scoring::{self, MetricsEngine};
use serde::Serialize;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Runs patterns, checkers, metrics and the recommender over a built graph
pub struct Analyzer {
    vendor_api_group: String,
    patterns: PatternEngine,
    checkers: Vec<Box<dyn BestPracticeChecker>>,
}

impl Analyzer {
    /// Analyzer with no pattern detectors or checkers wired
    pub fn new(vendor_api_group: impl Into<String>) -> Self {
        Self {
            vendor_api_group: vendor_api_group.into(),
            patterns: PatternEngine::new(),
            checkers: Vec::new(),
        }
    }

    /// Analyzer wired with every built-in unit the config leaves enabled
    pub fn builtin(config: &AnalyzerConfig) -> Self {
        let mut analyzer = Self::new(config.vendor_api_group.clone());

        for detector in detectors::builtin_detectors(&config.vendor_api_group) {
            if config.is_pattern_enabled(detector.name()) {
                analyzer.patterns.register(detector);
            } else {
                debug!("Pattern detector {} disabled by config", detector.name());
            }
        }
        let disabled = config.disabled_checkers();
        if !disabled.is_empty() {
            info!("Checkers disabled by config: {}", disabled.join(", "));
        }
        for checker in checkers::builtin_checkers() {
            if config.is_checker_enabled(checker.name()) {
                analyzer.checkers.push(checker);
            } else {
                debug!("Checker {} disabled by config", checker.name());
            }
        }
        analyzer
    }

    pub fn with_pattern_detector(mut self, detector: Box<dyn PatternDetector>) -> Self {
        self.patterns.register(detector);
        self
    }

    pub fn with_checker(mut self, checker: Box<dyn BestPracticeChecker>) -> Self {
        self.checkers.push(checker);
        self
    }

    pub fn pattern_detector_names(&self) -> Vec<&'static str> {
        self.patterns.detector_names()
    }

    pub fn checker_names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    /// Analyze a grouped graph
    pub fn analyze(&self, graph: &ResourceGraph) -> AnalysisResult {
        let metrics = MetricsEngine::new(&self.vendor_api_group).calculate(graph);
        let patterns = self.patterns.detect(graph, &metrics);

        let mut best_practices = Vec::new();
        for checker in &self.checkers {
            let findings = checker.check(graph);
            debug!("{}: {} finding(s)", checker.name(), findings.len());
            best_practices.extend(findings);
        }

        let strategy = scoring::recommend_strategy(patterns.primary, &metrics);
        let confidence = scoring::confidence(patterns.primary, patterns.detected.len(), &metrics);
        let recommendations = scoring::recommendations(strategy, &best_practices, &metrics);

        info!(
            "Analysis: primary pattern {}, strategy {} ({}% confidence), {} finding(s)",
            patterns.primary,
            strategy,
            confidence,
            best_practices.len()
        );

        AnalysisResult {
            detected_patterns: patterns.detected,
            primary_pattern: patterns.primary,
            recommended_strategy: strategy,
            confidence,
            best_practices,
            metrics,
            recommendations,
        }
    }
}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub graph: ResourceGraph,
    pub result: AnalysisResult,
    pub report: Report,
}

/// Build, analyze and report on a resource set.
///
/// Cancellation is only observed while the graph is built; a cancelled run
/// returns [`crate::AnalysisError::Cancelled`] and nothing else.
pub fn analyze_resources(
    resources: Vec<ProcessedResource>,
    config: &AnalyzerConfig,
    cancel: &CancellationToken,
) -> Result<Analysis> {
    let start = Instant::now();
    let graph = default_graph_builder().build(resources, cancel)?;
    let result = Analyzer::builtin(config).analyze(&graph);
    let report = build_report(&result, &config.report);
    info!("Analysis complete in {:?}", start.elapsed());

    Ok(Analysis {
        graph,
        result,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToggleOverride;
    use crate::models::{ArchitecturePattern, BestPractice, ChartStrategy, ResourceKey, Severity};

    struct EveryResourceIsAJob;

    impl PatternDetector for EveryResourceIsAJob {
        fn name(&self) -> &'static str {
            "always-job"
        }

        fn description(&self) -> &'static str {
            "Reports job for any non-empty graph"
        }

        fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
            if graph.resource_count() > 0 {
                vec![ArchitecturePattern::Job]
            } else {
                vec![]
            }
        }
    }

    struct TeamLabelChecker;

    impl BestPracticeChecker for TeamLabelChecker {
        fn name(&self) -> &'static str {
            "team-label"
        }

        fn category(&self) -> &'static str {
            "labels"
        }

        fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
            let affected: Vec<_> = graph
                .resources()
                .filter(|r| !r.labels.contains_key("team"))
                .map(|r| r.key.clone())
                .collect();
            if affected.is_empty() {
                return vec![];
            }
            vec![BestPractice {
                id: "team-label".to_string(),
                title: "Resources without a team label".to_string(),
                category: self.category().to_string(),
                severity: Severity::Warning,
                affected_resources: affected,
                ..Default::default()
            }]
        }
    }

    fn deployment(name: &str, service: &str) -> ProcessedResource {
        ProcessedResource::new(ResourceKey::new("apps", "v1", "Deployment", "default", name))
            .with_service(service)
    }

    #[test]
    fn test_builtin_wires_everything_by_default() {
        let analyzer = Analyzer::builtin(&AnalyzerConfig::default());
        assert_eq!(analyzer.checker_names().len(), 11);
        assert_eq!(analyzer.pattern_detector_names().len(), 5);
    }

    #[test]
    fn test_config_disables_units() {
        let mut config = AnalyzerConfig::default();
        config.checkers.insert(
            "image_policy".to_string(),
            ToggleOverride { enabled: Some(false) },
        );
        config.patterns.insert(
            "job".to_string(),
            ToggleOverride { enabled: Some(false) },
        );
        let analyzer = Analyzer::builtin(&config);
        assert!(!analyzer.checker_names().contains(&"image-policy"));
        assert!(!analyzer.pattern_detector_names().contains(&"job"));
    }

    #[test]
    fn test_caller_wired_units_run() {
        let graph = default_graph_builder()
            .build(
                vec![
                    deployment("web", "web"),
                    deployment("api", "api").with_label("team", "core"),
                ],
                &CancellationToken::new(),
            )
            .expect("build");
        let analyzer = Analyzer::new("vendor.chartplan.io")
            .with_pattern_detector(Box::new(EveryResourceIsAJob))
            .with_checker(Box::new(TeamLabelChecker));
        assert_eq!(analyzer.pattern_detector_names(), vec!["always-job"]);
        assert_eq!(analyzer.checker_names(), vec!["team-label"]);

        let result = analyzer.analyze(&graph);
        assert_eq!(result.detected_patterns, vec![ArchitecturePattern::Job]);
        assert_eq!(result.primary_pattern, ArchitecturePattern::Job);
        assert_eq!(result.best_practices.len(), 1);
        assert_eq!(result.best_practices[0].id, "team-label");
        assert_eq!(result.best_practices[0].affected_resources[0].name, "web");
        // a non-compliant warning earns the "address violations" recommendation
        assert!(result.recommendations.iter().any(|r| r.priority == 2));
    }

    #[test]
    fn test_empty_analyzer_falls_back() {
        let graph = default_graph_builder()
            .build(vec![deployment("web", "web")], &CancellationToken::new())
            .expect("build");
        let result = Analyzer::new("vendor.chartplan.io").analyze(&graph);
        assert!(result.detected_patterns.is_empty());
        assert_eq!(result.primary_pattern, ArchitecturePattern::Monolith);
        assert_eq!(result.recommended_strategy, ChartStrategy::Universal);
        assert!(result.best_practices.is_empty());
    }

    #[test]
    fn test_cancelled_run_produces_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = analyze_resources(
            vec![deployment("web", "web")],
            &AnalyzerConfig::default(),
            &cancel,
        );
        assert!(matches!(result, Err(crate::AnalysisError::Cancelled)));
    }
}
