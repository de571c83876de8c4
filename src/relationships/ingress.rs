//! Ingress backends and TLS secrets

use super::{each_map, resolve_key, str_at, EdgeSet, RelationshipDetector};
use crate::graph::{Relationship, RelationshipType};
use crate::models::ProcessedResource;
use crate::value::ValueMap;

pub struct IngressDetector;

/// Service name of a backend in either the `networking.k8s.io/v1` or the
/// legacy `extensions/v1beta1` shape
fn backend_service(backend: &ValueMap) -> Option<&str> {
    str_at(backend, &["service", "name"]).or_else(|| str_at(backend, &["serviceName"]))
}

impl RelationshipDetector for IngressDetector {
    fn name(&self) -> &'static str {
        "ingress"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn detect(&self, resource: &ProcessedResource, all: &[&ProcessedResource]) -> Vec<Relationship> {
        if resource.kind() != "Ingress" {
            return vec![];
        }
        let Some(spec) = resource.manifest.get("spec").and_then(|s| s.as_map()) else {
            return vec![];
        };
        let ns = resource.namespace();
        let mut edges = EdgeSet::new(&resource.key);

        for field in ["defaultBackend", "backend"] {
            let service = spec
                .get(field)
                .and_then(|b| b.as_map())
                .and_then(backend_service);
            if let Some(service) = service {
                edges.push(
                    resolve_key(all, "Service", ns, service),
                    RelationshipType::IngressBackend,
                    &format!("spec.{field}"),
                );
            }
        }

        for rule in each_map(spec.get("rules")) {
            for path in each_map(crate::value::lookup(rule, &["http", "paths"])) {
                let service = path
                    .get("backend")
                    .and_then(|b| b.as_map())
                    .and_then(backend_service);
                if let Some(service) = service {
                    edges.push(
                        resolve_key(all, "Service", ns, service),
                        RelationshipType::IngressBackend,
                        "spec.rules.http.paths.backend",
                    );
                }
            }
        }

        for tls in each_map(spec.get("tls")) {
            if let Some(secret) = str_at(tls, &["secretName"]) {
                edges.push(
                    resolve_key(all, "Secret", ns, secret),
                    RelationshipType::IngressTls,
                    "spec.tls.secretName",
                );
            }
        }

        edges.into_vec()
    }
}
