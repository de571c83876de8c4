//! RoleBinding / ClusterRoleBinding edges to their role and service accounts

use super::{each_map, resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;

pub struct RbacDetector;

impl RelationshipDetector for RbacDetector {
    fn name(&self) -> &'static str {
        "rbac"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        let cluster_scoped = match resource.kind() {
            "RoleBinding" => false,
            "ClusterRoleBinding" => true,
            _ => return vec![],
        };
        let manifest = &resource.manifest;
        let ns = resource.namespace();
        let mut edges = EdgeSet::new(&resource.key);

        if let Some(role_ref) = manifest.get("roleRef").and_then(|r| r.as_map()) {
            if let (Some(kind), Some(name)) = (str_at(role_ref, &["kind"]), str_at(role_ref, &["name"])) {
                let role_ns = if kind == "ClusterRole" { "" } else { ns };
                edges.push(resolve_key(all, kind, role_ns, name), RelationshipType::RoleRef, "roleRef");
            }
        }

        for subject in each_map(manifest.get("subjects")) {
            if str_at(subject, &["kind"]) != Some("ServiceAccount") {
                continue;
            }
            let Some(name) = str_at(subject, &["name"]) else {
                continue;
            };
            let subject_ns = str_at(subject, &["namespace"])
                .unwrap_or(if cluster_scoped { "" } else { ns });
            edges.push(
                resolve_key(all, "ServiceAccount", subject_ns, name),
                RelationshipType::RoleBinding,
                "subjects",
            );
        }

        edges.into_vec()
    }
}
