//! Relationship detectors
//!
//! Each detector looks at one resource (against the full resource set) and
//! emits directed edges. Detectors read the original manifest kept on the
//! processed resource; a manifest of an unexpected shape yields no edges.
//!
//! Edges always name their target by key, even when no such resource was
//! supplied. Where a matching resource exists its exact key is used, so that
//! grouping can follow the edge.
//!
//! # Built-in detectors (priority order)
//!
//! - `OwnerReferenceDetector` (100) - `metadata.ownerReferences`
//! - `LabelSelectorDetector` (90) - Service/PDB/NetworkPolicy/ServiceMonitor selectors
//! - `PodSpecDetector` (80) - volumes, env, service accounts, pull secrets
//! - `IngressDetector` (70) - backends and TLS secrets
//! - `AutoscalingDetector` (60) - HPA scale targets
//! - `RbacDetector` (50) - role bindings
//! - `StorageDetector` (40) - storage classes
//! - `CustomResourceDetector` (30) - instances of bundled CRDs

mod autoscaling;
mod custom_resource;
mod ingress;
mod label_selector;
mod owner_reference;
mod pod_spec;
mod rbac;
mod storage;

pub use autoscaling::AutoscalingDetector;
pub use custom_resource::CustomResourceDetector;
pub use ingress::IngressDetector;
pub use label_selector::LabelSelectorDetector;
pub use owner_reference::OwnerReferenceDetector;
pub use pod_spec::PodSpecDetector;
pub use rbac::RbacDetector;
pub use storage::StorageDetector;

use crate::graph::{Relationship, RelationshipType};
use crate::models::{ProcessedResource, ResourceKey};
use crate::value::{Value, ValueMap};
use std::collections::BTreeMap;

/// Finds edges leaving (or, rarely, arriving at) one resource
pub trait RelationshipDetector: Send + Sync {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Higher runs earlier
    fn priority(&self) -> i32;

    /// Inspect `resource` against every resource being analyzed
    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource])
        -> Vec<Relationship>;
}

/// Every built-in detector, unsorted
pub fn builtin_detectors() -> Vec<Box<dyn RelationshipDetector>> {
    vec![
        Box::new(OwnerReferenceDetector),
        Box::new(LabelSelectorDetector),
        Box::new(PodSpecDetector),
        Box::new(IngressDetector),
        Box::new(AutoscalingDetector),
        Box::new(RbacDetector),
        Box::new(StorageDetector),
        Box::new(CustomResourceDetector),
    ]
}

/// Kinds whose manifests embed a pod template
const POD_TEMPLATE_KINDS: &[&str] = &[
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "ReplicaSet",
    "Job",
];

/// Default `(group, version)` for kinds referenced by name only
fn default_group_version(kind: &str) -> (&'static str, &'static str) {
    match kind {
        "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" => ("apps", "v1"),
        "Job" | "CronJob" => ("batch", "v1"),
        "Ingress" | "NetworkPolicy" => ("networking.k8s.io", "v1"),
        "PodDisruptionBudget" => ("policy", "v1"),
        "HorizontalPodAutoscaler" => ("autoscaling", "v2"),
        "Role" | "ClusterRole" | "RoleBinding" | "ClusterRoleBinding" => {
            ("rbac.authorization.k8s.io", "v1")
        }
        "StorageClass" => ("storage.k8s.io", "v1"),
        "CustomResourceDefinition" => ("apiextensions.k8s.io", "v1"),
        _ => ("", "v1"),
    }
}

/// Key of the resource named `name` of `kind` in `namespace`.
///
/// Prefers an exact match from `all`, then a cluster-scoped match, and falls
/// back to a synthesized key with the kind's usual API group.
pub(crate) fn resolve_key(
    all: &[&ProcessedResource],
    kind: &str,
    namespace: &str,
    name: &str,
) -> ResourceKey {
    let found = all
        .iter()
        .find(|r| r.key.kind == kind && r.key.namespace == namespace && r.key.name == name)
        .or_else(|| {
            all.iter()
                .find(|r| r.key.kind == kind && r.key.namespace.is_empty() && r.key.name == name)
        });
    match found {
        Some(r) => r.key.clone(),
        None => {
            let (group, version) = default_group_version(kind);
            ResourceKey::new(group, version, kind, namespace, name)
        }
    }
}

/// The pod template of a workload-like manifest
pub(crate) fn pod_template(resource: &ProcessedResource) -> Option<&Value> {
    let manifest = &resource.manifest;
    match resource.kind() {
        "CronJob" => manifest.get_path(&["spec", "jobTemplate", "spec", "template"]),
        "Pod" => Some(manifest),
        kind if POD_TEMPLATE_KINDS.contains(&kind) => manifest.get_path(&["spec", "template"]),
        _ => None,
    }
}

pub(crate) fn pod_spec(resource: &ProcessedResource) -> Option<&ValueMap> {
    pod_template(resource)?.get("spec")?.as_map()
}

/// Labels a selector is matched against: pod template labels, else metadata labels
pub(crate) fn pod_labels(resource: &ProcessedResource) -> BTreeMap<String, String> {
    let template_labels = pod_template(resource)
        .and_then(|t| t.get_path(&["metadata", "labels"]))
        .map(string_map)
        .unwrap_or_default();
    if template_labels.is_empty() {
        resource_labels(resource)
    } else {
        template_labels
    }
}

/// Metadata labels, from the resource or its manifest
pub(crate) fn resource_labels(resource: &ProcessedResource) -> BTreeMap<String, String> {
    if !resource.labels.is_empty() {
        return resource.labels.clone();
    }
    resource
        .manifest
        .get_path(&["metadata", "labels"])
        .map(string_map)
        .unwrap_or_default()
}

/// Scalar entries of a map value as strings
pub(crate) fn string_map(value: &Value) -> BTreeMap<String, String> {
    value
        .as_map()
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| v.to_scalar_string().map(|s| (k.clone(), s)))
                .collect()
        })
        .unwrap_or_default()
}

/// An empty selector matches nothing
pub(crate) fn selector_matches(
    selector: &BTreeMap<String, String>,
    labels: &BTreeMap<String, String>,
) -> bool {
    !selector.is_empty() && selector.iter().all(|(k, v)| labels.get(k) == Some(v))
}

/// Map elements of a list value; non-map elements are skipped
pub(crate) fn each_map<'a>(value: Option<&'a Value>) -> impl Iterator<Item = &'a ValueMap> + 'a {
    value
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_map)
}

/// Non-empty string at `path` inside `map`
pub(crate) fn str_at<'a>(map: &'a ValueMap, path: &[&str]) -> Option<&'a str> {
    crate::value::lookup(map, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Collects edges from one resource, skipping exact duplicates
pub(crate) struct EdgeSet<'a> {
    from: &'a ResourceKey,
    edges: Vec<Relationship>,
}

impl<'a> EdgeSet<'a> {
    pub(crate) fn new(from: &'a ResourceKey) -> Self {
        Self {
            from,
            edges: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, to: ResourceKey, kind: RelationshipType, field: &str) {
        if self.edges.iter().any(|e| e.to == to && e.kind == kind) {
            return;
        }
        self.edges
            .push(Relationship::new(self.from.clone(), to, kind).with_field(field));
    }

    pub(crate) fn into_vec(self) -> Vec<Relationship> {
        self.edges
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Build a processed resource straight from a manifest
    pub(crate) fn from_manifest(manifest: serde_json::Value) -> ProcessedResource {
        let manifest = Value::from(manifest);
        let api_version = manifest
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or("v1")
            .to_string();
        let kind = manifest.get("kind").and_then(Value::as_str).unwrap_or("").to_string();
        let namespace = manifest
            .get_path(&["metadata", "namespace"])
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let name = manifest
            .get_path(&["metadata", "name"])
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        ProcessedResource::new(ResourceKey::from_api_version(&api_version, kind, namespace, name))
            .with_manifest(manifest)
    }

    #[test]
    fn test_selector_matching() {
        let labels: BTreeMap<_, _> = [("app".to_string(), "web".to_string())].into();
        let selector = labels.clone();
        assert!(selector_matches(&selector, &labels));
        assert!(!selector_matches(&BTreeMap::new(), &labels));

        let wider: BTreeMap<_, _> = [
            ("app".to_string(), "web".to_string()),
            ("tier".to_string(), "front".to_string()),
        ]
        .into();
        assert!(!selector_matches(&wider, &labels));
    }

    #[test]
    fn test_resolve_key_prefers_existing_resource() {
        let cm = from_manifest(json!({
            "apiVersion": "v1", "kind": "ConfigMap",
            "metadata": {"name": "cfg", "namespace": "prod"}
        }));
        let all = vec![&cm];
        assert_eq!(resolve_key(&all, "ConfigMap", "prod", "cfg"), cm.key);

        let synthesized = resolve_key(&all, "Deployment", "prod", "web");
        assert_eq!(synthesized.group, "apps");
        assert_eq!(synthesized.namespace, "prod");
    }

    #[test]
    fn test_pod_labels_fall_back_to_metadata() {
        let cronjob = from_manifest(json!({
            "apiVersion": "batch/v1", "kind": "CronJob",
            "metadata": {"name": "nightly", "labels": {"app": "batch"}},
            "spec": {"jobTemplate": {"spec": {"template": {"metadata": {"labels": {"app": "nightly"}}}}}}
        }));
        assert_eq!(pod_labels(&cronjob).get("app").map(String::as_str), Some("nightly"));

        let svc = from_manifest(json!({
            "apiVersion": "v1", "kind": "Service",
            "metadata": {"name": "web", "labels": {"app": "web"}}
        }));
        assert_eq!(pod_labels(&svc).get("app").map(String::as_str), Some("web"));
    }
}
