//! Best-practice checkers
//!
//! Each checker inspects the whole graph and reports findings, compliant or
//! violating. Checkers never fail: a workload whose values do not carry the
//! expected shape is treated as giving no evidence and is skipped.
//!
//! Unless stated otherwise, checkers look at workload kinds only
//! (Deployment, StatefulSet, DaemonSet), reading containers from the
//! processed values bag under `containers`.
//!
//! # Built-in checkers
//!
//! | Checker | Findings |
//! |---------|----------|
//! | `resource-limits` | missing limits / requests |
//! | `security-context` | root user, writable root fs, privileged |
//! | `high-availability` | single replica, no probes, no PDB |
//! | `init-containers` | init containers in use (compliant) |
//! | `qos-class` | BestEffort, Guaranteed (compliant) |
//! | `statefulset-patterns` | serviceName, podManagementPolicy, updateStrategy |
//! | `daemonset-patterns` | tolerations, updateStrategy, limits |
//! | `graceful-shutdown` | no preStop and no grace period |
//! | `pod-security-standards` | Privileged workloads |
//! | `image-policy` | untagged or `latest` images |
//! | `recommended-labels` | missing `app.kubernetes.io/name` |

mod daemonset;
mod graceful_shutdown;
mod high_availability;
mod image_policy;
mod init_containers;
mod labels;
mod pod_security;
mod qos;
mod resource_limits;
mod security_context;
mod statefulset;

pub use daemonset::DaemonSetPatternChecker;
pub use graceful_shutdown::GracefulShutdownChecker;
pub use high_availability::HighAvailabilityChecker;
pub use image_policy::{is_pinned, ImagePolicyChecker};
pub use init_containers::InitContainerChecker;
pub use labels::RecommendedLabelsChecker;
pub use pod_security::{classify_pod_security, PodSecurityLevel, PodSecurityStandardsChecker};
pub use qos::{qos_class, QosClass, QosClassChecker};
pub use resource_limits::ResourceLimitsChecker;
pub use security_context::SecurityContextChecker;
pub use statefulset::StatefulSetPatternChecker;

use crate::graph::ResourceGraph;
use crate::models::{BestPractice, ProcessedResource, ResourceKey, Severity};
use crate::value::{lookup, ValueMap};

/// Trait for all best-practice checkers
pub trait BestPracticeChecker: Send + Sync {
    /// Unique identifier, used for enabling/disabling from config
    fn name(&self) -> &'static str;

    /// Category the findings are reported under
    fn category(&self) -> &'static str;

    /// Run the checks; findings with no affected resources are not reported
    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice>;
}

/// Every built-in checker in reporting order
pub fn builtin_checkers() -> Vec<Box<dyn BestPracticeChecker>> {
    vec![
        Box::new(ResourceLimitsChecker),
        Box::new(SecurityContextChecker),
        Box::new(HighAvailabilityChecker),
        Box::new(InitContainerChecker),
        Box::new(QosClassChecker),
        Box::new(StatefulSetPatternChecker),
        Box::new(DaemonSetPatternChecker),
        Box::new(GracefulShutdownChecker),
        Box::new(PodSecurityStandardsChecker),
        Box::new(ImagePolicyChecker),
        Box::new(RecommendedLabelsChecker),
    ]
}

/// Deployments, StatefulSets and DaemonSets in graph order
pub(crate) fn workloads(graph: &ResourceGraph) -> impl Iterator<Item = &ProcessedResource> {
    graph.resources().filter(|r| r.key.is_workload())
}

/// True when `path` exists and is not null
pub(crate) fn has(map: &ValueMap, path: &[&str]) -> bool {
    lookup(map, path).is_some_and(|v| !v.is_null())
}

/// Template for one rule; turned into a finding once affected resources are known
pub(crate) struct Rule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub auto_fixable: bool,
    pub compliant: bool,
    pub recommendations: &'static [&'static str],
}

impl Rule {
    /// Append a finding for this rule when `affected` is non-empty
    pub(crate) fn report(
        &self,
        category: &str,
        affected: Vec<ResourceKey>,
        out: &mut Vec<BestPractice>,
    ) {
        if affected.is_empty() {
            return;
        }
        out.push(BestPractice {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: category.to_string(),
            severity: self.severity,
            compliant: self.compliant,
            recommendations: self.recommendations.iter().map(|s| s.to_string()).collect(),
            affected_resources: affected,
            auto_fixable: self.auto_fixable,
        });
    }
}
