//! Metrics engine
//!
//! Derives counts and the complexity/coupling scores from a grouped graph.

use crate::graph::ResourceGraph;
use crate::models::{AnalysisMetrics, KIND_INGRESS, KIND_PVC, KIND_SECRET, KIND_STATEFULSET};
use std::collections::BTreeMap;
use tracing::debug;

const MAX_SCORE: u32 = 100;

pub struct MetricsEngine<'a> {
    vendor_api_group: &'a str,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(vendor_api_group: &'a str) -> Self {
        Self { vendor_api_group }
    }

    /// Compute every metric fresh from the graph
    pub fn calculate(&self, graph: &ResourceGraph) -> AnalysisMetrics {
        let groups = graph.groups();
        let total_services = groups.len();
        let total_resources = graph.resource_count();

        let mut resources_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for key in graph.keys() {
            *resources_by_kind.entry(key.kind.clone()).or_insert(0) += 1;
        }

        let stateful_services = groups
            .iter()
            .filter(|g| g.contains_kind(KIND_STATEFULSET) || g.contains_kind(KIND_PVC))
            .count();
        let services_with_ingress = groups.iter().filter(|g| g.contains_kind(KIND_INGRESS)).count();
        let services_with_secrets = groups.iter().filter(|g| g.contains_kind(KIND_SECRET)).count();
        let vendor_resources = graph
            .keys()
            .filter(|k| k.group == self.vendor_api_group)
            .count();

        let avg_resources_per_service = if total_services > 0 {
            total_resources as f64 / total_services as f64
        } else {
            0.0
        };

        let complexity = complexity_score(
            total_resources,
            total_services,
            stateful_services,
            resources_by_kind.len(),
        );
        let coupling = coupling_score(graph);

        debug!(
            "Metrics: {} resources, {} services, complexity={}, coupling={}",
            total_resources, total_services, complexity, coupling
        );

        AnalysisMetrics {
            total_services,
            total_resources,
            resources_by_kind,
            avg_resources_per_service,
            stateful_services,
            services_with_ingress,
            services_with_secrets,
            complexity_score: complexity,
            coupling_score: coupling,
            vendor_resources,
        }
    }
}

/// Additive packaging-difficulty estimate, capped at 100
pub fn complexity_score(
    total_resources: usize,
    total_services: usize,
    stateful_services: usize,
    distinct_kinds: usize,
) -> u32 {
    let resource_points: u64 = match total_resources {
        n if n > 50 => 30,
        n if n > 20 => 20,
        n if n > 10 => 10,
        _ => 0,
    };
    let service_points: u64 = match total_services {
        n if n > 10 => 30,
        n if n > 5 => 20,
        n if n > 2 => 10,
        _ => 0,
    };
    let score = resource_points
        + service_points
        + 10u64.saturating_mul(stateful_services as u64)
        + 2u64.saturating_mul(distinct_kinds as u64);
    score.min(MAX_SCORE as u64) as u32
}

/// Share of edges that cross service boundaries, as a floored percentage
pub fn coupling_score(graph: &ResourceGraph) -> u32 {
    let edges = graph.relationships();
    if graph.groups().len() <= 1 || edges.is_empty() {
        return 0;
    }
    let cross = edges
        .iter()
        .filter(|edge| {
            let from = graph.service_of(&edge.from);
            let to = graph.service_of(&edge.to);
            !from.is_empty() && !to.is_empty() && from != to
        })
        .count();
    (cross * 100 / edges.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{group_resources, Relationship, RelationshipType};
    use crate::models::{ProcessedResource, ResourceKey};

    fn key(kind: &str, name: &str) -> ResourceKey {
        ResourceKey::new("", "v1", kind, "default", name)
    }

    fn edge(from: &ResourceKey, to: &ResourceKey) -> Relationship {
        Relationship::new(from.clone(), to.clone(), RelationshipType::NameReference)
    }

    #[test]
    fn test_complexity_thresholds() {
        assert_eq!(complexity_score(0, 0, 0, 0), 0);
        assert_eq!(complexity_score(10, 2, 0, 0), 0);
        assert_eq!(complexity_score(11, 3, 0, 0), 20);
        assert_eq!(complexity_score(21, 6, 0, 0), 40);
        assert_eq!(complexity_score(51, 11, 0, 0), 60);
        assert_eq!(complexity_score(2, 1, 1, 2), 14);
        assert_eq!(complexity_score(100, 20, 5, 30), 100);
    }

    #[test]
    fn test_complexity_is_monotonic() {
        let mut last = 0;
        for n in 0..80 {
            let score = complexity_score(n, n / 4, n / 10, n / 3);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_coupling_zero_for_single_group() {
        let mut graph = ResourceGraph::new();
        let a = key("Deployment", "a");
        let b = key("Service", "b");
        graph.add_resource(ProcessedResource::new(a.clone()).with_service("app"));
        graph.add_resource(ProcessedResource::new(b.clone()).with_service("app"));
        graph.add_relationship(edge(&b, &a));
        group_resources(&mut graph);
        assert_eq!(coupling_score(&graph), 0);
    }

    #[test]
    fn test_dangling_edge_only_in_denominator() {
        let mut graph = ResourceGraph::new();
        let a = key("Deployment", "a");
        let b = key("Deployment", "b");
        graph.add_resource(ProcessedResource::new(a.clone()).with_service("alpha"));
        graph.add_resource(ProcessedResource::new(b.clone()).with_service("beta"));
        graph.add_relationship(edge(&a, &b));
        graph.add_relationship(edge(&key("Secret", "ghost"), &b));
        graph.add_relationship(edge(&key("Secret", "ghost"), &a));
        group_resources(&mut graph);

        // 1 cross edge out of 3
        assert_eq!(coupling_score(&graph), 33);
    }

    #[test]
    fn test_metrics_counts() {
        let mut graph = ResourceGraph::new();
        graph.add_resource(ProcessedResource::new(key("StatefulSet", "db")).with_service("db"));
        graph.add_resource(ProcessedResource::new(key("PersistentVolumeClaim", "data")).with_service("db"));
        graph.add_resource(ProcessedResource::new(key("Secret", "creds")).with_service("db"));
        graph.add_resource(ProcessedResource::new(key("Deployment", "web")).with_service("web"));
        graph.add_resource(ProcessedResource::new(key("Ingress", "web")).with_service("web"));
        graph.add_resource(ProcessedResource::new(ResourceKey::new(
            "vendor.example.io",
            "v1",
            "Gateway",
            "default",
            "edge",
        )));
        group_resources(&mut graph);

        let m = MetricsEngine::new("vendor.example.io").calculate(&graph);
        assert_eq!(m.total_resources, 6);
        assert_eq!(m.total_services, 3);
        assert_eq!(m.stateful_services, 1);
        assert_eq!(m.services_with_ingress, 1);
        assert_eq!(m.services_with_secrets, 1);
        assert_eq!(m.vendor_resources, 1);
        assert_eq!(m.resources_by_kind.get("Secret"), Some(&1));
        assert!((m.avg_resources_per_service - 2.0).abs() < f64::EPSILON);
        // services >2: +10, stateful: +10, 6 kinds: +12
        assert_eq!(m.complexity_score, 32);
    }
}
