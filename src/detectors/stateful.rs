//! Stateful and node-agent detection

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{ArchitecturePattern, KIND_DAEMONSET, KIND_PVC, KIND_STATEFULSET};

pub struct StatefulDetector;

impl PatternDetector for StatefulDetector {
    fn name(&self) -> &'static str {
        "stateful"
    }

    fn description(&self) -> &'static str {
        "Persistent volume claims or StatefulSets; DaemonSets mark node agents"
    }

    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
        let mut patterns = Vec::new();
        if graph.has_kind(KIND_PVC) || graph.has_kind(KIND_STATEFULSET) {
            patterns.push(ArchitecturePattern::Stateful);
        }
        if graph.has_kind(KIND_DAEMONSET) {
            patterns.push(ArchitecturePattern::Daemonset);
        }
        patterns
    }
}
