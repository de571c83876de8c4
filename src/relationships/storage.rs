//! Storage class references from claims and claim templates

use super::{each_map, resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;

pub struct StorageDetector;

impl RelationshipDetector for StorageDetector {
    fn name(&self) -> &'static str {
        "storage"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        let manifest = &resource.manifest;
        let mut edges = EdgeSet::new(&resource.key);

        match resource.kind() {
            "PersistentVolumeClaim" => {
                let class = manifest
                    .get_path(&["spec", "storageClassName"])
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty());
                if let Some(class) = class {
                    edges.push(
                        resolve_key(all, "StorageClass", "", class),
                        RelationshipType::StorageClass,
                        "spec.storageClassName",
                    );
                }
            }
            "StatefulSet" => {
                for template in each_map(manifest.get_path(&["spec", "volumeClaimTemplates"])) {
                    if let Some(class) = str_at(template, &["spec", "storageClassName"]) {
                        edges.push(
                            resolve_key(all, "StorageClass", "", class),
                            RelationshipType::StorageClass,
                            "spec.volumeClaimTemplates.spec.storageClassName",
                        );
                    }
                }
            }
            _ => {}
        }

        edges.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::tests::from_manifest;
    use serde_json::json;

    #[test]
    fn test_pvc_storage_class() {
        let pvc = from_manifest(json!({
            "apiVersion": "v1", "kind": "PersistentVolumeClaim",
            "metadata": {"name": "data", "namespace": "db"},
            "spec": {"storageClassName": "fast-ssd"}
        }));
        let edges = StorageDetector.detect(&pvc, &[&pvc]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to.group, "storage.k8s.io");
        assert_eq!(edges[0].to.namespace, "");
    }

    #[test]
    fn test_claim_templates_deduplicated() {
        let sts = from_manifest(json!({
            "apiVersion": "apps/v1", "kind": "StatefulSet",
            "metadata": {"name": "db", "namespace": "db"},
            "spec": {"volumeClaimTemplates": [
                {"metadata": {"name": "data"}, "spec": {"storageClassName": "fast-ssd"}},
                {"metadata": {"name": "wal"}, "spec": {"storageClassName": "fast-ssd"}}
            ]}
        }));
        assert_eq!(StorageDetector.detect(&sts, &[&sts]).len(), 1);
    }
}
