//! Pod Security Standards classification
//!
//! ```text
//! host namespaces? ──yes──► Privileged
//!        │no
//! containers usable? ──no──► Baseline
//!        │yes
//! for each container:
//!   privileged ─────────────► Privileged (stop)
//!   no securityContext ─┐
//!   runAsNonRoot != true├──► at most Baseline
//!   no drop ALL         │
//!   no seccompProfile ──┘
//!        │
//!        ▼
//!   Restricted
//! ```
//!
//! Only Privileged workloads are reported; Baseline is the normal state of
//! most manifests and is left to the security-context checker.

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::{containers, is_true, lookup, Value, ValueMap, Values};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PodSecurityLevel {
    Privileged,
    Baseline,
    Restricted,
}

impl std::fmt::Display for PodSecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PodSecurityLevel::Privileged => "privileged",
            PodSecurityLevel::Baseline => "baseline",
            PodSecurityLevel::Restricted => "restricted",
        };
        write!(f, "{}", s)
    }
}

const HOST_NAMESPACES: [&str; 3] = ["hostNetwork", "hostPID", "hostIPC"];

/// Classify a workload from its processed values
pub fn classify_pod_security(values: &Values) -> PodSecurityLevel {
    if HOST_NAMESPACES
        .into_iter()
        .any(|field| values.get(field).and_then(Value::as_bool) == Some(true))
    {
        return PodSecurityLevel::Privileged;
    }

    let Some(containers) = containers(values) else {
        return PodSecurityLevel::Baseline;
    };

    let mut level = PodSecurityLevel::Restricted;
    for container in containers {
        match container_level(container) {
            PodSecurityLevel::Privileged => return PodSecurityLevel::Privileged,
            PodSecurityLevel::Baseline => level = PodSecurityLevel::Baseline,
            PodSecurityLevel::Restricted => {}
        }
    }
    level
}

fn container_level(container: &ValueMap) -> PodSecurityLevel {
    let Some(ctx) = container.get("securityContext").and_then(Value::as_map) else {
        return PodSecurityLevel::Baseline;
    };
    if is_true(ctx, &["privileged"]) {
        return PodSecurityLevel::Privileged;
    }
    if !is_true(ctx, &["runAsNonRoot"]) || !drops_all(ctx) {
        return PodSecurityLevel::Baseline;
    }
    if lookup(ctx, &["seccompProfile"]).map_or(true, Value::is_null) {
        return PodSecurityLevel::Baseline;
    }
    PodSecurityLevel::Restricted
}

fn drops_all(ctx: &ValueMap) -> bool {
    lookup(ctx, &["capabilities", "drop"])
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .any(|cap| cap.eq_ignore_ascii_case("ALL"))
}

const PRIVILEGED_WORKLOAD: Rule = Rule {
    id: "pss-privileged",
    title: "Workloads at the Privileged pod security level",
    description: "These workloads would be rejected by a namespace enforcing the baseline standard.",
    severity: Severity::Critical,
    auto_fixable: false,
    compliant: false,
    recommendations: &[
        "Remove hostNetwork, hostPID and hostIPC",
        "Remove privileged: true from every container",
        "Target the restricted profile: runAsNonRoot, drop ALL capabilities, RuntimeDefault seccomp",
    ],
};

pub struct PodSecurityStandardsChecker;

impl BestPracticeChecker for PodSecurityStandardsChecker {
    fn name(&self) -> &'static str {
        "pod-security-standards"
    }

    fn category(&self) -> &'static str {
        "security"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let affected: Vec<_> = workloads(graph)
            .filter(|w| classify_pod_security(&w.values) == PodSecurityLevel::Privileged)
            .map(|w| w.key.clone())
            .collect();

        let mut findings = Vec::new();
        PRIVILEGED_WORKLOAD.report(self.category(), affected, &mut findings);
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::tests::{graph_with, resource};
    use crate::value::values_from_json;
    use serde_json::json;

    fn restricted_container() -> serde_json::Value {
        json!({
            "name": "app",
            "securityContext": {
                "runAsNonRoot": true,
                "capabilities": {"drop": ["all"]},
                "seccompProfile": {"type": "RuntimeDefault"}
            }
        })
    }

    fn level(values: serde_json::Value) -> PodSecurityLevel {
        classify_pod_security(&values_from_json(values))
    }

    #[test]
    fn test_restricted_requires_every_check() {
        assert_eq!(
            level(json!({"containers": [restricted_container()]})),
            PodSecurityLevel::Restricted
        );

        let mut no_seccomp = restricted_container();
        no_seccomp["securityContext"]
            .as_object_mut()
            .expect("object")
            .remove("seccompProfile");
        assert_eq!(level(json!({"containers": [no_seccomp]})), PodSecurityLevel::Baseline);

        let mut keeps_caps = restricted_container();
        keeps_caps["securityContext"]["capabilities"]["drop"] = json!(["NET_RAW"]);
        assert_eq!(level(json!({"containers": [keeps_caps]})), PodSecurityLevel::Baseline);

        let mut string_true = restricted_container();
        string_true["securityContext"]["runAsNonRoot"] = json!("true");
        assert_eq!(level(json!({"containers": [string_true]})), PodSecurityLevel::Baseline);
    }

    #[test]
    fn test_host_namespaces_are_privileged() {
        for field in HOST_NAMESPACES {
            let mut values = json!({"containers": [restricted_container()]});
            values[field] = json!(true);
            assert_eq!(level(values), PodSecurityLevel::Privileged, "{field}");
        }
    }

    #[test]
    fn test_privileged_container_overrides_others() {
        let values = json!({"containers": [
            {"name": "plain"},
            restricted_container(),
            {"name": "root", "securityContext": {"privileged": true}}
        ]});
        assert_eq!(level(values), PodSecurityLevel::Privileged);
    }

    #[test]
    fn test_missing_evidence_is_baseline() {
        assert_eq!(level(json!({})), PodSecurityLevel::Baseline);
        assert_eq!(level(json!({"containers": {"app": {}}})), PodSecurityLevel::Baseline);
        assert_eq!(level(json!({"containers": [1, 2]})), PodSecurityLevel::Baseline);
    }

    #[test]
    fn test_empty_container_list_is_restricted() {
        // a well-shaped list with nothing in it fails no check
        assert_eq!(level(json!({"containers": []})), PodSecurityLevel::Restricted);
        assert_eq!(
            level(json!({"containers": [], "hostPID": true})),
            PodSecurityLevel::Privileged
        );
    }

    #[test]
    fn test_only_privileged_workloads_are_reported() {
        let graph = graph_with(vec![
            resource("Deployment", "plain", json!({"containers": [{"name": "a"}]})),
            resource("DaemonSet", "node-agent", json!({
                "hostNetwork": true,
                "containers": [{"name": "a"}]
            })),
        ]);
        let findings = PodSecurityStandardsChecker.check(&graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].affected_resources[0].name, "node-agent");
    }
}
