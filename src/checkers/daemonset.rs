//! DaemonSet configuration: tolerations, update strategy, container limits

use super::{has, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity, KIND_DAEMONSET};
use crate::value::containers;

const NO_TOLERATIONS: Rule = Rule {
    id: "daemonset-tolerations",
    title: "DaemonSet without tolerations",
    description: "Without tolerations the DaemonSet skips tainted nodes such as control-plane nodes.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Add tolerations for every node taint the agent must run on"],
};

const NO_UPDATE_STRATEGY: Rule = Rule {
    id: "daemonset-update-strategy",
    title: "DaemonSet without updateStrategy",
    description: "Rollout behaviour across nodes is left to the default.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Set updateStrategy.rollingUpdate.maxUnavailable"],
};

const NO_LIMITS: Rule = Rule {
    id: "daemonset-resource-limits",
    title: "DaemonSet containers without limits",
    description: "A DaemonSet runs on every node; an unbounded container affects the whole cluster.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Set resources.limits on every DaemonSet container"],
};

pub struct DaemonSetPatternChecker;

impl BestPracticeChecker for DaemonSetPatternChecker {
    fn name(&self) -> &'static str {
        "daemonset-patterns"
    }

    fn category(&self) -> &'static str {
        "daemonset"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut no_tolerations = Vec::new();
        let mut no_strategy = Vec::new();
        let mut no_limits = Vec::new();

        for ds in graph.resources_by_kind(KIND_DAEMONSET) {
            if !has(&ds.values, &["tolerations"]) {
                no_tolerations.push(ds.key.clone());
            }
            if !has(&ds.values, &["updateStrategy"]) {
                no_strategy.push(ds.key.clone());
            }
            if let Some(containers) = containers(&ds.values) {
                if containers.iter().any(|c| !has(c, &["resources", "limits"])) {
                    no_limits.push(ds.key.clone());
                }
            }
        }

        let mut findings = Vec::new();
        NO_TOLERATIONS.report(self.category(), no_tolerations, &mut findings);
        NO_UPDATE_STRATEGY.report(self.category(), no_strategy, &mut findings);
        NO_LIMITS.report(self.category(), no_limits, &mut findings);
        findings
    }
}
