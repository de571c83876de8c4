//! Init container usage

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::init_containers;

const USES_INIT_CONTAINERS: Rule = Rule {
    id: "init-containers",
    title: "Init containers in use",
    description: "Workloads prepare their environment with init containers before starting.",
    severity: Severity::Info,
    auto_fixable: false,
    compliant: true,
    recommendations: &["Keep init containers idempotent and give them resource limits"],
};

/// Reports workloads that use init containers
pub struct InitContainerChecker;

impl BestPracticeChecker for InitContainerChecker {
    fn name(&self) -> &'static str {
        "init-containers"
    }

    fn category(&self) -> &'static str {
        "configuration"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let affected: Vec<_> = workloads(graph)
            .filter(|w| init_containers(&w.values).is_some_and(|list| !list.is_empty()))
            .map(|w| w.key.clone())
            .collect();

        let mut findings = Vec::new();
        USES_INIT_CONTAINERS.report(self.category(), affected, &mut findings);
        findings
    }
}
