//! Graceful shutdown: preStop hooks or a termination grace period

use super::{has, workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::containers;

const NO_GRACEFUL_SHUTDOWN: Rule = Rule {
    id: "graceful-shutdown",
    title: "No graceful shutdown configuration",
    description: "Neither a preStop hook nor terminationGracePeriodSeconds is set.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &[
        "Add a lifecycle.preStop hook to drain connections",
        "Set terminationGracePeriodSeconds to cover the longest request",
    ],
};

/// Workloads with no `preStop` hook on any container and no grace period
pub struct GracefulShutdownChecker;

impl BestPracticeChecker for GracefulShutdownChecker {
    fn name(&self) -> &'static str {
        "graceful-shutdown"
    }

    fn category(&self) -> &'static str {
        "lifecycle"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let affected: Vec<_> = workloads(graph)
            .filter(|w| {
                let Some(containers) = containers(&w.values) else {
                    return false;
                };
                let has_pre_stop = containers.iter().any(|c| has(c, &["lifecycle", "preStop"]));
                !has_pre_stop && !has(&w.values, &["terminationGracePeriodSeconds"])
            })
            .map(|w| w.key.clone())
            .collect();

        let mut findings = Vec::new();
        NO_GRACEFUL_SHUTDOWN.report(self.category(), affected, &mut findings);
        findings
    }
}
