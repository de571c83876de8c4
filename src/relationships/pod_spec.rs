//! References made from a pod template: volumes, environment, service
//! accounts, image pull secrets, and a StatefulSet's governing Service.

use super::{each_map, pod_spec, resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;
use crate::value::ValueMap;

pub struct PodSpecDetector;

impl RelationshipDetector for PodSpecDetector {
    fn name(&self) -> &'static str {
        "pod-spec"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        let Some(spec) = pod_spec(resource) else {
            return vec![];
        };
        let ns = resource.namespace();
        let mut edges = EdgeSet::new(&resource.key);

        for volume in each_map(spec.get("volumes")) {
            volume_refs(volume, |kind, name, rel| {
                edges.push(resolve_key(all, kind, ns, name), rel, "spec.volumes");
            });
        }

        let containers = each_map(spec.get("initContainers")).chain(each_map(spec.get("containers")));
        for container in containers {
            for env in each_map(container.get("env")) {
                if let Some(name) = str_at(env, &["valueFrom", "configMapKeyRef", "name"]) {
                    edges.push(
                        resolve_key(all, "ConfigMap", ns, name),
                        RelationshipType::EnvValueFrom,
                        "env.valueFrom.configMapKeyRef",
                    );
                }
                if let Some(name) = str_at(env, &["valueFrom", "secretKeyRef", "name"]) {
                    edges.push(
                        resolve_key(all, "Secret", ns, name),
                        RelationshipType::EnvValueFrom,
                        "env.valueFrom.secretKeyRef",
                    );
                }
            }
            for source in each_map(container.get("envFrom")) {
                if let Some(name) = str_at(source, &["configMapRef", "name"]) {
                    edges.push(
                        resolve_key(all, "ConfigMap", ns, name),
                        RelationshipType::EnvFrom,
                        "envFrom.configMapRef",
                    );
                }
                if let Some(name) = str_at(source, &["secretRef", "name"]) {
                    edges.push(
                        resolve_key(all, "Secret", ns, name),
                        RelationshipType::EnvFrom,
                        "envFrom.secretRef",
                    );
                }
            }
        }

        let account = str_at(spec, &["serviceAccountName"]).or_else(|| str_at(spec, &["serviceAccount"]));
        if let Some(account) = account.filter(|a| *a != "default") {
            edges.push(
                resolve_key(all, "ServiceAccount", ns, account),
                RelationshipType::ServiceAccount,
                "spec.serviceAccountName",
            );
        }

        for secret in each_map(spec.get("imagePullSecrets")) {
            if let Some(name) = str_at(secret, &["name"]) {
                edges.push(
                    resolve_key(all, "Secret", ns, name),
                    RelationshipType::ImagePullSecret,
                    "spec.imagePullSecrets",
                );
            }
        }

        if resource.kind() == "StatefulSet" {
            let service = resource
                .manifest
                .get_path(&["spec", "serviceName"])
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty());
            if let Some(service) = service {
                edges.push(
                    resolve_key(all, "Service", ns, service),
                    RelationshipType::NameReference,
                    "spec.serviceName",
                );
            }
        }

        edges.into_vec()
    }
}

/// Call `emit(kind, name, type)` for every object a volume points at
fn volume_refs<'a>(volume: &'a ValueMap, mut emit: impl FnMut(&str, &'a str, RelationshipType)) {
    if let Some(name) = str_at(volume, &["configMap", "name"]) {
        emit("ConfigMap", name, RelationshipType::VolumeMount);
    }
    if let Some(name) = str_at(volume, &["secret", "secretName"]) {
        emit("Secret", name, RelationshipType::VolumeMount);
    }
    if let Some(name) = str_at(volume, &["persistentVolumeClaim", "claimName"]) {
        emit("PersistentVolumeClaim", name, RelationshipType::VolumeClaim);
    }
    for source in each_map(crate::value::lookup(volume, &["projected", "sources"])) {
        if let Some(name) = str_at(source, &["configMap", "name"]) {
            emit("ConfigMap", name, RelationshipType::VolumeMount);
        }
        if let Some(name) = str_at(source, &["secret", "name"]) {
            emit("Secret", name, RelationshipType::VolumeMount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::tests::from_manifest;
    use serde_json::json;

    fn web_deployment() -> ProcessedResource {
        from_manifest(json!({
            "apiVersion": "apps/v1", "kind": "Deployment",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"template": {"spec": {
                "serviceAccountName": "web-sa",
                "imagePullSecrets": [{"name": "registry"}],
                "volumes": [
                    {"name": "cfg", "configMap": {"name": "web-config"}},
                    {"name": "tls", "secret": {"secretName": "web-tls"}},
                    {"name": "data", "persistentVolumeClaim": {"claimName": "web-data"}}
                ],
                "containers": [{
                    "name": "web",
                    "env": [
                        {"name": "A", "valueFrom": {"configMapKeyRef": {"name": "web-config", "key": "a"}}},
                        {"name": "B", "valueFrom": {"secretKeyRef": {"name": "db-creds", "key": "pw"}}}
                    ],
                    "envFrom": [{"secretRef": {"name": "api-keys"}}]
                }]
            }}}
        }))
    }

    #[test]
    fn test_pod_spec_references() {
        let dep = web_deployment();
        let edges = PodSpecDetector.detect(&dep, &[&dep]);
        let kinds: Vec<(String, RelationshipType)> = edges
            .iter()
            .map(|e| (format!("{}/{}", e.to.kind, e.to.name), e.kind))
            .collect();

        assert!(kinds.contains(&("ConfigMap/web-config".into(), RelationshipType::VolumeMount)));
        assert!(kinds.contains(&("Secret/web-tls".into(), RelationshipType::VolumeMount)));
        assert!(kinds.contains(&("PersistentVolumeClaim/web-data".into(), RelationshipType::VolumeClaim)));
        assert!(kinds.contains(&("ConfigMap/web-config".into(), RelationshipType::EnvValueFrom)));
        assert!(kinds.contains(&("Secret/db-creds".into(), RelationshipType::EnvValueFrom)));
        assert!(kinds.contains(&("Secret/api-keys".into(), RelationshipType::EnvFrom)));
        assert!(kinds.contains(&("ServiceAccount/web-sa".into(), RelationshipType::ServiceAccount)));
        assert!(kinds.contains(&("Secret/registry".into(), RelationshipType::ImagePullSecret)));
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().all(|e| e.to.namespace == "prod"));
    }

    #[test]
    fn test_statefulset_service_name() {
        let sts = from_manifest(json!({
            "apiVersion": "apps/v1", "kind": "StatefulSet",
            "metadata": {"name": "db", "namespace": "data"},
            "spec": {"serviceName": "db-headless", "template": {"spec": {"containers": []}}}
        }));
        let edges = PodSpecDetector.detect(&sts, &[&sts]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].kind, RelationshipType::NameReference);
        assert_eq!(edges[0].to.name, "db-headless");
    }

    #[test]
    fn test_default_service_account_is_ignored() {
        let dep = from_manifest(json!({
            "apiVersion": "apps/v1", "kind": "Deployment",
            "metadata": {"name": "web"},
            "spec": {"template": {"spec": {"serviceAccountName": "default"}}}
        }));
        assert!(PodSpecDetector.detect(&dep, &[&dep]).is_empty());
    }

    #[test]
    fn test_non_workloads_have_no_pod_spec() {
        let cm = from_manifest(json!({"apiVersion": "v1", "kind": "ConfigMap", "metadata": {"name": "x"}}));
        assert!(PodSpecDetector.detect(&cm, &[&cm]).is_empty());
    }
}
