//! Packaging strategy recommendation
//!
//! ```text
//! vendor-extension  ──► >1 service ? hybrid : universal
//! microservices     ──► >5 services ? separate
//!                       2 < services <= 5 and coupling < 20 ? umbrella
//! monolith or <=2 services ──► universal
//! operator          ──► library
//! complexity > 70   ──► umbrella
//! otherwise         ──► universal
//! ```
//!
//! The first matching row wins. A microservices set that matches neither of
//! its rows keeps going down the table.

use crate::models::{
    AnalysisMetrics, ArchitecturePattern, BestPractice, ChartStrategy, Recommendation, Severity,
};

const BASE_CONFIDENCE: i32 = 50;

/// Choose the packaging strategy for a primary pattern and its metrics
pub fn recommend_strategy(primary: ArchitecturePattern, metrics: &AnalysisMetrics) -> ChartStrategy {
    let services = metrics.total_services;

    if primary == ArchitecturePattern::VendorExtension {
        return if services > 1 {
            ChartStrategy::Hybrid
        } else {
            ChartStrategy::Universal
        };
    }

    if primary == ArchitecturePattern::Microservices {
        if services > 5 {
            return ChartStrategy::Separate;
        }
        if services > 2 && metrics.coupling_score < 20 {
            return ChartStrategy::Umbrella;
        }
    }

    if primary == ArchitecturePattern::Monolith || services <= 2 {
        return ChartStrategy::Universal;
    }

    if primary == ArchitecturePattern::Operator {
        return ChartStrategy::Library;
    }

    if metrics.complexity_score > 70 {
        return ChartStrategy::Umbrella;
    }

    ChartStrategy::Universal
}

/// Confidence (0-100) in the recommended strategy
///
/// `pattern_count` is the number of distinct patterns the detectors reported.
pub fn confidence(
    primary: ArchitecturePattern,
    pattern_count: usize,
    metrics: &AnalysisMetrics,
) -> u32 {
    let mut score = BASE_CONFIDENCE;

    score += match metrics.total_resources {
        n if n > 20 => 20,
        n if n > 10 => 10,
        _ => 0,
    };

    score += match pattern_count {
        n if n > 3 => -15,
        1 => 15,
        _ => 0,
    };

    if primary == ArchitecturePattern::VendorExtension && metrics.vendor_resources > 0 {
        score += 15;
    }

    score.clamp(0, 100) as u32
}

/// Prioritized recommendations, ascending by priority
pub fn recommendations(
    strategy: ChartStrategy,
    findings: &[BestPractice],
    metrics: &AnalysisMetrics,
) -> Vec<Recommendation> {
    let mut recs = vec![Recommendation {
        priority: 1,
        title: format!("Use the {} chart strategy", strategy),
        description: strategy.description().to_string(),
    }];

    let violations: Vec<&BestPractice> = findings.iter().filter(|f| f.is_violation()).collect();
    if !violations.is_empty() {
        let at = |severity: Severity| violations.iter().filter(|f| f.severity == severity).count();
        recs.push(Recommendation {
            priority: 2,
            title: "Address best-practice violations".to_string(),
            description: format!(
                "{} finding(s) need attention: {} critical, {} error, {} warning",
                violations.len(),
                at(Severity::Critical),
                at(Severity::Error),
                at(Severity::Warning)
            ),
        });
    }

    if metrics.complexity_score > 60 {
        recs.push(Recommendation {
            priority: 3,
            title: "Reduce packaging complexity".to_string(),
            description: format!(
                "Complexity score is {}/100; split large services or share templates through a library chart",
                metrics.complexity_score
            ),
        });
    }

    recs.sort_by_key(|r| r.priority);
    recs
}
