//! HorizontalPodAutoscaler scale targets

use super::{resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;

pub struct AutoscalingDetector;

impl RelationshipDetector for AutoscalingDetector {
    fn name(&self) -> &'static str {
        "autoscaling"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        if resource.kind() != "HorizontalPodAutoscaler" {
            return vec![];
        }
        let Some(target) = resource
            .manifest
            .get_path(&["spec", "scaleTargetRef"])
            .and_then(|t| t.as_map())
        else {
            return vec![];
        };
        let (Some(kind), Some(name)) = (str_at(target, &["kind"]), str_at(target, &["name"])) else {
            return vec![];
        };

        let mut edges = EdgeSet::new(&resource.key);
        edges.push(
            resolve_key(all, kind, resource.namespace(), name),
            RelationshipType::ScaleTarget,
            "spec.scaleTargetRef",
        );
        edges.into_vec()
    }
}
