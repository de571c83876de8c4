//! Selector-based edges: Services, PodDisruptionBudgets, NetworkPolicies and
//! ServiceMonitors pointing at the resources their selectors match.

use super::{pod_labels, resource_labels, selector_matches, string_map, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;

/// Kinds whose pods can be selected
const SELECTABLE_KINDS: &[&str] = &["Deployment", "StatefulSet", "DaemonSet", "Job", "CronJob", "Pod"];

pub struct LabelSelectorDetector;

const SERVICE_SELECTOR: &[&str] = &["spec", "selector"];
const MATCH_LABELS: &[&str] = &["spec", "selector", "matchLabels"];
const POD_SELECTOR: &[&str] = &["spec", "podSelector", "matchLabels"];

impl LabelSelectorDetector {
    /// `(selector path, edge type, selects services instead of pods)`
    fn selector_for(kind: &str) -> Option<(&'static [&'static str], RelationshipType, bool)> {
        match kind {
            "Service" => Some((SERVICE_SELECTOR, RelationshipType::LabelSelector, false)),
            "PodDisruptionBudget" => Some((MATCH_LABELS, RelationshipType::PdbSelector, false)),
            "NetworkPolicy" => Some((POD_SELECTOR, RelationshipType::NetworkPolicy, false)),
            "ServiceMonitor" => Some((MATCH_LABELS, RelationshipType::ServiceMonitor, true)),
            _ => None,
        }
    }
}

impl RelationshipDetector for LabelSelectorDetector {
    fn name(&self) -> &'static str {
        "label-selector"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        let Some((path, kind, selects_services)) = Self::selector_for(resource.kind()) else {
            return vec![];
        };
        let selector = resource
            .manifest
            .get_path(path)
            .map(string_map)
            .unwrap_or_default();
        if selector.is_empty() {
            return vec![];
        }

        let field = path.join(".");
        let mut edges = EdgeSet::new(&resource.key);
        for candidate in all {
            if candidate.key == resource.key || candidate.namespace() != resource.namespace() {
                continue;
            }
            let labels = if selects_services {
                if candidate.kind() != "Service" {
                    continue;
                }
                resource_labels(candidate)
            } else {
                if !SELECTABLE_KINDS.contains(&candidate.kind()) {
                    continue;
                }
                pod_labels(candidate)
            };
            if selector_matches(&selector, &labels) {
                edges.push(candidate.key.clone(), kind, &field);
            }
        }
        edges.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::tests::from_manifest;
    use serde_json::json;

    fn deployment(name: &str, ns: &str, app: &str) -> ProcessedResource {
        from_manifest(json!({
            "apiVersion": "apps/v1", "kind": "Deployment",
            "metadata": {"name": name, "namespace": ns},
            "spec": {"template": {"metadata": {"labels": {"app": app, "tier": "web"}}}}
        }))
    }

    #[test]
    fn test_service_selects_matching_deployment_in_namespace() {
        let web = deployment("web", "prod", "web");
        let other_ns = deployment("web", "staging", "web");
        let api = deployment("api", "prod", "api");
        let svc = from_manifest(json!({
            "apiVersion": "v1", "kind": "Service",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"selector": {"app": "web"}}
        }));
        let all = vec![&web, &other_ns, &api, &svc];
        let edges = LabelSelectorDetector.detect(&svc, &all);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, web.key);
        assert_eq!(edges[0].kind, RelationshipType::LabelSelector);
        assert_eq!(edges[0].field, "spec.selector");
    }

    #[test]
    fn test_pdb_uses_match_labels() {
        let web = deployment("web", "prod", "web");
        let pdb = from_manifest(json!({
            "apiVersion": "policy/v1", "kind": "PodDisruptionBudget",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"selector": {"matchLabels": {"app": "web"}}}
        }));
        let edges = LabelSelectorDetector.detect(&pdb, &[&web, &pdb]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].kind, RelationshipType::PdbSelector);
    }

    #[test]
    fn test_service_monitor_selects_services() {
        let svc = from_manifest(json!({
            "apiVersion": "v1", "kind": "Service",
            "metadata": {"name": "web", "namespace": "prod", "labels": {"app": "web"}}
        }));
        let web = deployment("web", "prod", "web");
        let monitor = from_manifest(json!({
            "apiVersion": "monitoring.coreos.com/v1", "kind": "ServiceMonitor",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"selector": {"matchLabels": {"app": "web"}}}
        }));
        let edges = LabelSelectorDetector.detect(&monitor, &[&svc, &web, &monitor]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, svc.key);
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        let web = deployment("web", "prod", "web");
        let svc = from_manifest(json!({
            "apiVersion": "v1", "kind": "Service",
            "metadata": {"name": "headless", "namespace": "prod"},
            "spec": {"selector": {}}
        }));
        assert!(LabelSelectorDetector.detect(&svc, &[&web, &svc]).is_empty());
    }
}
