//! Vendor extension and sidecar detection

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{ArchitecturePattern, KIND_DEPLOYMENT};
use crate::value::containers;

pub struct VendorDetector {
    api_group: String,
}

impl VendorDetector {
    pub fn new(api_group: impl Into<String>) -> Self {
        Self {
            api_group: api_group.into(),
        }
    }
}

impl PatternDetector for VendorDetector {
    fn name(&self) -> &'static str {
        "vendor"
    }

    fn description(&self) -> &'static str {
        "Resources from the vendor extension API group; multi-container Deployments mark sidecars"
    }

    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
        let mut patterns = Vec::new();
        if graph.keys().any(|k| k.group == self.api_group) {
            patterns.push(ArchitecturePattern::VendorExtension);
        }

        let has_sidecar = graph
            .resources_by_kind(KIND_DEPLOYMENT)
            .any(|d| containers(&d.values).is_some_and(|c| c.len() > 1));
        if has_sidecar {
            patterns.push(ArchitecturePattern::Sidecar);
        }
        patterns
    }
}
