//! Operator detection: a CRD shipped together with its controller

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{ArchitecturePattern, ProcessedResource, KIND_CRD, KIND_DEPLOYMENT};

const CONTROLLER_NAME_HINTS: &[&str] = &["controller", "operator"];
const CONTROL_PLANE_LABEL: &str = "control-plane";

pub struct OperatorDetector;

fn looks_like_controller(deployment: &ProcessedResource) -> bool {
    let name = deployment.name();
    CONTROLLER_NAME_HINTS.iter().any(|hint| name.contains(hint))
        || deployment
            .labels
            .iter()
            .any(|(k, v)| k.contains(CONTROL_PLANE_LABEL) || v.contains(CONTROL_PLANE_LABEL))
}

impl PatternDetector for OperatorDetector {
    fn name(&self) -> &'static str {
        "operator"
    }

    fn description(&self) -> &'static str {
        "A CustomResourceDefinition plus a controller Deployment"
    }

    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
        if !graph.has_kind(KIND_CRD) {
            return vec![];
        }
        if graph.resources_by_kind(KIND_DEPLOYMENT).any(looks_like_controller) {
            vec![ArchitecturePattern::Operator]
        } else {
            vec![]
        }
    }
}
