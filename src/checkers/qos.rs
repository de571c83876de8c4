//! Quality-of-service class inference
//!
//! Follows the kubelet's rules: a container with no requests or limits at all
//! is BestEffort; a pod is Guaranteed when every container sets cpu and
//! memory limits and requests, and they are equal. Anything else is Burstable.

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::{containers, lookup, ValueMap};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QosClass {
    BestEffort,
    Burstable,
    Guaranteed,
}

const TRACKED: [&str; 2] = ["cpu", "memory"];

/// QoS class of a pod made of `containers`; `None` for an empty pod
pub fn qos_class(containers: &[&ValueMap]) -> Option<QosClass> {
    if containers.is_empty() {
        return None;
    }
    if containers.iter().all(|c| !sets_any_resources(c)) {
        return Some(QosClass::BestEffort);
    }
    if containers.iter().all(|c| is_guaranteed(c)) {
        return Some(QosClass::Guaranteed);
    }
    Some(QosClass::Burstable)
}

fn sets_any_resources(container: &ValueMap) -> bool {
    ["limits", "requests"].into_iter().any(|section| {
        lookup(container, &["resources", section])
            .and_then(|v| v.as_map())
            .is_some_and(|m| !m.is_empty())
    })
}

fn is_guaranteed(container: &ValueMap) -> bool {
    TRACKED.into_iter().all(|resource| {
        let limit = lookup(container, &["resources", "limits", resource])
            .and_then(|v| v.to_scalar_string());
        let request = lookup(container, &["resources", "requests", resource])
            .and_then(|v| v.to_scalar_string());
        matches!((limit, request), (Some(limit), Some(request)) if limit == request)
    })
}

const BEST_EFFORT: Rule = Rule {
    id: "qos-best-effort",
    title: "BestEffort QoS class",
    description: "No container sets requests or limits; these pods are evicted first under pressure.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Set resource requests to move workloads to the Burstable class"],
};

const GUARANTEED: Rule = Rule {
    id: "qos-guaranteed",
    title: "Guaranteed QoS class",
    description: "Every container's cpu and memory limits equal its requests.",
    severity: Severity::Info,
    auto_fixable: false,
    compliant: true,
    recommendations: &[],
};

pub struct QosClassChecker;

impl BestPracticeChecker for QosClassChecker {
    fn name(&self) -> &'static str {
        "qos-class"
    }

    fn category(&self) -> &'static str {
        "resources"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut best_effort = Vec::new();
        let mut guaranteed = Vec::new();

        for workload in workloads(graph) {
            let Some(containers) = containers(&workload.values) else {
                continue;
            };
            match qos_class(&containers) {
                Some(QosClass::BestEffort) => best_effort.push(workload.key.clone()),
                Some(QosClass::Guaranteed) => guaranteed.push(workload.key.clone()),
                _ => {}
            }
        }

        let mut findings = Vec::new();
        BEST_EFFORT.report(self.category(), best_effort, &mut findings);
        GUARANTEED.report(self.category(), guaranteed, &mut findings);
        findings
    }
}
