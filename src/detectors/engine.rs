//! Pattern detection engine
//!
//! Runs every registered pattern detector over the graph, counts how often
//! each pattern was reported, and chooses the primary pattern.
//!
//! ```text
//! detectors ──► counts per pattern ──► detected (first-seen order)
//!                                  └─► primary (highest count, earliest wins ties)
//! no reports at all ──► fallback decision on metrics
//! ```

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{AnalysisMetrics, ArchitecturePattern};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

/// Outcome of pattern detection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatternSummary {
    /// Deduplicated, in order of first report
    pub detected: Vec<ArchitecturePattern>,
    pub primary: ArchitecturePattern,
    /// Number of reports per detected pattern, parallel to `detected`
    pub counts: Vec<usize>,
}

pub struct PatternEngine {
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn register(&mut self, detector: Box<dyn PatternDetector>) {
        self.detectors.push(detector);
    }

    pub fn with_detector(mut self, detector: Box<dyn PatternDetector>) -> Self {
        self.register(detector);
        self
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn detect(&self, graph: &ResourceGraph, metrics: &AnalysisMetrics) -> PatternSummary {
        let mut detected: Vec<ArchitecturePattern> = Vec::new();
        let mut counts: FxHashMap<ArchitecturePattern, usize> = FxHashMap::default();

        for detector in &self.detectors {
            let found = detector.detect(graph);
            debug!("{}: {:?}", detector.name(), found);
            for pattern in found {
                let count = counts.entry(pattern).or_insert(0);
                if *count == 0 {
                    detected.push(pattern);
                }
                *count += 1;
            }
        }

        let primary = primary_pattern(&detected, &counts).unwrap_or_else(|| fallback_pattern(metrics));
        let counts = detected.iter().map(|p| counts[p]).collect();

        PatternSummary {
            detected,
            primary,
            counts,
        }
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest count wins; among equal counts the earliest detected pattern wins
fn primary_pattern(
    detected: &[ArchitecturePattern],
    counts: &FxHashMap<ArchitecturePattern, usize>,
) -> Option<ArchitecturePattern> {
    let mut best: Option<(ArchitecturePattern, usize)> = None;
    for pattern in detected {
        let count = counts.get(pattern).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((*pattern, count));
        }
    }
    best.map(|(p, _)| p)
}

/// Decision used when no detector reported anything
pub fn fallback_pattern(metrics: &AnalysisMetrics) -> ArchitecturePattern {
    if metrics.vendor_resources > 0 {
        ArchitecturePattern::VendorExtension
    } else if metrics.total_services > 3 && metrics.coupling_score < 30 {
        ArchitecturePattern::Microservices
    } else if metrics.total_services <= 2 || metrics.coupling_score > 70 {
        ArchitecturePattern::Monolith
    } else if metrics.stateful_services > 0 {
        ArchitecturePattern::Stateful
    } else {
        ArchitecturePattern::Stateless
    }
}
