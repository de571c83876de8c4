//! High availability: replica count, health probes, disruption budgets

use super::{has, workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity, KIND_DEPLOYMENT, KIND_PDB};
use crate::value::containers;

const SINGLE_REPLICA: Rule = Rule {
    id: "ha-single-replica",
    title: "Deployments running a single replica",
    description: "A single replica is unavailable during rollouts and node failures.",
    severity: Severity::Warning,
    auto_fixable: true,
    compliant: false,
    recommendations: &["Run at least 2 replicas, or add a HorizontalPodAutoscaler"],
};

const NO_PROBES: Rule = Rule {
    id: "ha-missing-probes",
    title: "Workloads without health probes",
    description: "No container defines a liveness or readiness probe.",
    severity: Severity::Error,
    auto_fixable: false,
    compliant: false,
    recommendations: &[
        "Add a readinessProbe so traffic only reaches ready pods",
        "Add a livenessProbe to restart wedged containers",
    ],
};

const NO_PDB: Rule = Rule {
    id: "ha-missing-pdb",
    title: "No PodDisruptionBudget",
    description: "Several Deployments exist but nothing limits voluntary disruptions.",
    severity: Severity::Info,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Add a PodDisruptionBudget for each replicated Deployment"],
};

pub struct HighAvailabilityChecker;

impl BestPracticeChecker for HighAvailabilityChecker {
    fn name(&self) -> &'static str {
        "high-availability"
    }

    fn category(&self) -> &'static str {
        "availability"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut findings = Vec::new();

        let single: Vec<_> = graph
            .resources_by_kind(KIND_DEPLOYMENT)
            .filter(|d| d.values.get("replicas").and_then(|v| v.as_i64()) == Some(1))
            .map(|d| d.key.clone())
            .collect();
        SINGLE_REPLICA.report(self.category(), single, &mut findings);

        let unprobed: Vec<_> = workloads(graph)
            .filter(|w| match containers(&w.values) {
                Some(list) => !list
                    .iter()
                    .any(|c| has(c, &["livenessProbe"]) || has(c, &["readinessProbe"])),
                None => false,
            })
            .map(|w| w.key.clone())
            .collect();
        NO_PROBES.report(self.category(), unprobed, &mut findings);

        let deployments: Vec<_> = graph
            .resources_by_kind(KIND_DEPLOYMENT)
            .map(|d| d.key.clone())
            .collect();
        if deployments.len() > 1 && !graph.has_kind(KIND_PDB) {
            NO_PDB.report(self.category(), deployments, &mut findings);
        }

        findings
    }
}
