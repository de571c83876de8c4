//! Container resource limits and requests

use super::{has, workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::containers;

const MISSING_LIMITS: Rule = Rule {
    id: "resource-limits",
    title: "Containers without resource limits",
    description: "Containers without limits can consume unbounded CPU and memory on a node.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Set resources.limits.cpu and resources.limits.memory for every container"],
};

const MISSING_REQUESTS: Rule = Rule {
    id: "resource-requests",
    title: "Containers without resource requests",
    description: "Without requests the scheduler cannot place pods reliably.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Set resources.requests.cpu and resources.requests.memory for every container"],
};

pub struct ResourceLimitsChecker;

impl BestPracticeChecker for ResourceLimitsChecker {
    fn name(&self) -> &'static str {
        "resource-limits"
    }

    fn category(&self) -> &'static str {
        "resources"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut no_limits = Vec::new();
        let mut no_requests = Vec::new();

        for workload in workloads(graph) {
            let Some(containers) = containers(&workload.values) else {
                continue;
            };
            if containers.iter().any(|c| !has(c, &["resources", "limits"])) {
                no_limits.push(workload.key.clone());
            }
            if containers.iter().any(|c| !has(c, &["resources", "requests"])) {
                no_requests.push(workload.key.clone());
            }
        }

        let mut findings = Vec::new();
        MISSING_LIMITS.report(self.category(), no_limits, &mut findings);
        MISSING_REQUESTS.report(self.category(), no_requests, &mut findings);
        findings
    }
}
