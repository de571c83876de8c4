//! Recommended `app.kubernetes.io` labels on workloads

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};

pub const APP_NAME_LABEL: &str = "app.kubernetes.io/name";

const MISSING_NAME_LABEL: Rule = Rule {
    id: "recommended-labels",
    title: "Workloads without app.kubernetes.io/name",
    description: "The recommended labels let tooling group resources by application.",
    severity: Severity::Info,
    auto_fixable: true,
    compliant: false,
    recommendations: &["Add app.kubernetes.io/name (and instance, version, component) labels"],
};

/// Workloads missing the recommended application name label
pub struct RecommendedLabelsChecker;

impl BestPracticeChecker for RecommendedLabelsChecker {
    fn name(&self) -> &'static str {
        "recommended-labels"
    }

    fn category(&self) -> &'static str {
        "metadata"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let affected: Vec<_> = workloads(graph)
            .filter(|w| !w.labels.contains_key(APP_NAME_LABEL))
            .map(|w| w.key.clone())
            .collect();

        let mut findings = Vec::new();
        MISSING_NAME_LABEL.report(self.category(), affected, &mut findings);
        findings
    }
}
