//! Microservices / stateless detection
//!
//! The stateless check only runs once the microservices layout is confirmed.
//! A small set with no storage reports nothing here and is classified by the
//! metrics fallback instead (usually monolith).

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{ArchitecturePattern, KIND_DEPLOYMENT, KIND_PVC, KIND_STATEFULSET};

/// Minimum groups (and groups running a workload) for a microservices layout
const MIN_SERVICES: usize = 3;

pub struct MicroservicesDetector;

impl PatternDetector for MicroservicesDetector {
    fn name(&self) -> &'static str {
        "microservices"
    }

    fn description(&self) -> &'static str {
        "Several service groups each running their own workload, stateless when nothing is persisted"
    }

    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
        let mut patterns = Vec::new();

        let groups = graph.groups();
        let with_workload = groups
            .iter()
            .filter(|g| g.contains_kind(KIND_DEPLOYMENT) || g.contains_kind(KIND_STATEFULSET))
            .count();
        if groups.len() < MIN_SERVICES || with_workload < MIN_SERVICES {
            return patterns;
        }
        patterns.push(ArchitecturePattern::Microservices);

        if !graph.has_kind(KIND_PVC) && !graph.has_kind(KIND_STATEFULSET) {
            patterns.push(ArchitecturePattern::Stateless);
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::tests::graph_of;

    #[test]
    fn test_three_groups_with_workloads() {
        let graph = graph_of(&[
            ("Deployment", "a", "a"),
            ("Deployment", "b", "b"),
            ("StatefulSet", "c", "c"),
        ]);
        let patterns = MicroservicesDetector.detect(&graph);
        assert_eq!(patterns, vec![ArchitecturePattern::Microservices]);
    }

    #[test]
    fn test_stateless_microservices() {
        let graph = graph_of(&[
            ("Deployment", "a", "a"),
            ("Deployment", "b", "b"),
            ("Deployment", "c", "c"),
        ]);
        assert_eq!(
            MicroservicesDetector.detect(&graph),
            vec![ArchitecturePattern::Microservices, ArchitecturePattern::Stateless]
        );
    }

    #[test]
    fn test_groups_without_workloads_do_not_count() {
        let graph = graph_of(&[
            ("Deployment", "a", "a"),
            ("Deployment", "b", "b"),
            ("ConfigMap", "c", "c"),
        ]);
        assert!(MicroservicesDetector.detect(&graph).is_empty());
    }
}
