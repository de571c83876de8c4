//! Instances of CustomResourceDefinitions shipped in the same resource set

use super::{str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::{ProcessedResource, KIND_CRD};

pub struct CustomResourceDetector;

impl RelationshipDetector for CustomResourceDetector {
    fn name(&self) -> &'static str {
        "custom-resource"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        if resource.key.group.is_empty() || resource.kind() == KIND_CRD {
            return vec![];
        }
        let mut edges = EdgeSet::new(&resource.key);
        for crd in all.iter().filter(|r| r.kind() == KIND_CRD) {
            let Some(spec) = crd.manifest.get("spec").and_then(|s| s.as_map()) else {
                continue;
            };
            let defines = str_at(spec, &["group"]) == Some(resource.key.group.as_str())
                && str_at(spec, &["names", "kind"]) == Some(resource.kind());
            if defines {
                edges.push(crd.key.clone(), RelationshipType::CustomResource, "apiVersion");
            }
        }
        edges.into_vec()
    }
}
