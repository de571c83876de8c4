//! Owner references declared in `metadata.ownerReferences`

use super::{each_map, resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::{split_api_version, ProcessedResource, ResourceKey};

pub struct OwnerReferenceDetector;

impl RelationshipDetector for OwnerReferenceDetector {
    fn name(&self) -> &'static str {
        "owner-reference"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        let mut edges = EdgeSet::new(&resource.key);
        let owners = resource.manifest.get_path(&["metadata", "ownerReferences"]);

        for owner in each_map(owners) {
            let (Some(kind), Some(name)) = (str_at(owner, &["kind"]), str_at(owner, &["name"])) else {
                continue;
            };
            let mut target = resolve_key(all, kind, resource.namespace(), name);
            if !all.iter().any(|r| r.key == target) {
                // honour the declared apiVersion for owners we were not given
                if let Some(api_version) = str_at(owner, &["apiVersion"]) {
                    let (group, version) = split_api_version(api_version);
                    target = ResourceKey::new(group, version, kind, resource.namespace(), name);
                }
            }
            edges.push(target, RelationshipType::OwnerReference, "metadata.ownerReferences");
        }

        edges.into_vec()
    }
}
