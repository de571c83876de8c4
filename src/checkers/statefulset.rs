//! StatefulSet configuration: headless service, pod management policy,
//! update strategy

use super::{has, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity, KIND_STATEFULSET};

const RULES: [(&str, Rule); 3] = [
    (
        "serviceName",
        Rule {
            id: "statefulset-service-name",
            title: "StatefulSet without serviceName",
            description: "Stable network identities need a governing headless Service.",
            severity: Severity::Warning,
            auto_fixable: false,
            compliant: false,
            recommendations: &["Set serviceName to a headless Service (clusterIP: None)"],
        },
    ),
    (
        "podManagementPolicy",
        Rule {
            id: "statefulset-pod-management-policy",
            title: "StatefulSet without podManagementPolicy",
            description: "The pod management policy is left to the default (OrderedReady).",
            severity: Severity::Warning,
            auto_fixable: false,
            compliant: false,
            recommendations: &["Set podManagementPolicy explicitly (OrderedReady or Parallel)"],
        },
    ),
    (
        "updateStrategy",
        Rule {
            id: "statefulset-update-strategy",
            title: "StatefulSet without updateStrategy",
            description: "Rollout behaviour is left to the default.",
            severity: Severity::Warning,
            auto_fixable: false,
            compliant: false,
            recommendations: &["Set updateStrategy, with a partition for staged rollouts"],
        },
    ),
];

pub struct StatefulSetPatternChecker;

impl BestPracticeChecker for StatefulSetPatternChecker {
    fn name(&self) -> &'static str {
        "statefulset-patterns"
    }

    fn category(&self) -> &'static str {
        "statefulset"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut findings = Vec::new();
        for (field, rule) in &RULES {
            let missing: Vec<_> = graph
                .resources_by_kind(KIND_STATEFULSET)
                .filter(|s| !has(&s.values, &[*field]))
                .map(|s| s.key.clone())
                .collect();
            rule.report(self.category(), missing, &mut findings);
        }
        findings
    }
}
