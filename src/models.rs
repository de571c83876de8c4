//! Core data models for chartplan
//!
//! These models are used throughout the codebase for representing
//! resources, findings, and analysis results.

use crate::value::{Value, Values};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KIND_DEPLOYMENT: &str = "Deployment";
pub const KIND_STATEFULSET: &str = "StatefulSet";
pub const KIND_DAEMONSET: &str = "DaemonSet";
pub const KIND_INGRESS: &str = "Ingress";
pub const KIND_SECRET: &str = "Secret";
pub const KIND_PVC: &str = "PersistentVolumeClaim";
pub const KIND_PDB: &str = "PodDisruptionBudget";
pub const KIND_JOB: &str = "Job";
pub const KIND_CRONJOB: &str = "CronJob";
pub const KIND_CRD: &str = "CustomResourceDefinition";

/// Kinds that run long-lived containers
pub const WORKLOAD_KINDS: &[&str] = &[KIND_DEPLOYMENT, KIND_STATEFULSET, KIND_DAEMONSET];

/// Unique identity of a resource
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct ResourceKey {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    pub kind: String,
    /// Empty for cluster-scoped resources
    #[serde(default)]
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Build a key from an `apiVersion` string (`apps/v1`, or `v1` for the core group)
    pub fn from_api_version(
        api_version: &str,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let (group, version) = split_api_version(api_version);
        Self::new(group, version, kind, namespace, name)
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn is_workload(&self) -> bool {
        WORKLOAD_KINDS.contains(&self.kind.as_str())
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}/{}", self.kind, self.name)
        } else {
            write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
        }
    }
}

/// Split `group/version` into its parts; a bare version belongs to the core group.
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    match api_version.rsplit_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    }
}

/// A resource after upstream extraction and per-kind processing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessedResource {
    pub key: ResourceKey,
    /// Pre-assigned service; empty means "let grouping decide"
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// The original decoded object, when the producer kept it
    #[serde(default)]
    pub manifest: Value,
    #[serde(default)]
    pub values: Values,
}

impl ProcessedResource {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service_name = service.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    pub fn with_manifest(mut self, manifest: Value) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn kind(&self) -> &str {
        &self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn namespace(&self) -> &str {
        &self.key.namespace
    }
}

/// Severity levels for best-practice findings, ordered by impact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "unknown severity '{other}' (expected info, warning, error, critical)"
            )),
        }
    }
}

/// Architecture patterns recognised across a resource set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitecturePattern {
    Microservices,
    Monolith,
    Stateful,
    Stateless,
    Sidecar,
    Daemonset,
    Job,
    Operator,
    VendorExtension,
}

impl ArchitecturePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitecturePattern::Microservices => "microservices",
            ArchitecturePattern::Monolith => "monolith",
            ArchitecturePattern::Stateful => "stateful",
            ArchitecturePattern::Stateless => "stateless",
            ArchitecturePattern::Sidecar => "sidecar",
            ArchitecturePattern::Daemonset => "daemonset",
            ArchitecturePattern::Job => "job",
            ArchitecturePattern::Operator => "operator",
            ArchitecturePattern::VendorExtension => "vendor-extension",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ArchitecturePattern::Microservices => "Multiple independently deployable services",
            ArchitecturePattern::Monolith => "A single application with tightly bound resources",
            ArchitecturePattern::Stateful => "Workloads that own persistent state",
            ArchitecturePattern::Stateless => "Workloads with no persistent storage",
            ArchitecturePattern::Sidecar => "Pods running helper containers next to the main one",
            ArchitecturePattern::Daemonset => "Node-level agents running on every node",
            ArchitecturePattern::Job => "Batch or scheduled workloads",
            ArchitecturePattern::Operator => "A controller managing custom resources",
            ArchitecturePattern::VendorExtension => "Resources from the vendor extension API group",
        }
    }
}

impl std::fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How resources should be packaged into charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStrategy {
    /// One chart for everything
    Universal,
    /// One chart per service
    Separate,
    /// Shared templates in a library chart
    Library,
    /// Parent chart with per-service subcharts
    Umbrella,
    /// Mix of a core chart and per-service charts
    Hybrid,
}

impl ChartStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartStrategy::Universal => "universal",
            ChartStrategy::Separate => "separate",
            ChartStrategy::Library => "library",
            ChartStrategy::Umbrella => "umbrella",
            ChartStrategy::Hybrid => "hybrid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartStrategy::Universal => "Package all resources into a single chart",
            ChartStrategy::Separate => "Create an independent chart for each service",
            ChartStrategy::Library => "Extract shared templates into a library chart",
            ChartStrategy::Umbrella => "Use an umbrella chart with one subchart per service",
            ChartStrategy::Hybrid => "Combine a core chart with separate service charts",
        }
    }
}

impl std::fmt::Display for ChartStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A best-practice finding, compliant or violating
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestPractice {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    pub compliant: bool,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub affected_resources: Vec<ResourceKey>,
    #[serde(default)]
    pub auto_fixable: bool,
}

impl BestPractice {
    /// A non-compliant finding that should be acted upon
    pub fn is_violation(&self) -> bool {
        !self.compliant && self.severity != Severity::Info
    }
}

/// Quantitative view of the graph, recomputed on every analysis
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalysisMetrics {
    pub total_services: usize,
    pub total_resources: usize,
    pub resources_by_kind: BTreeMap<String, usize>,
    pub avg_resources_per_service: f64,
    pub stateful_services: usize,
    pub services_with_ingress: usize,
    pub services_with_secrets: usize,
    /// 0-100, higher is harder to package
    pub complexity_score: u32,
    /// 0-100, lower is better decoupled
    pub coupling_score: u32,
    pub vendor_resources: usize,
}

/// A prioritized recommendation (1 = most important)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub priority: u8,
    pub title: String,
    pub description: String,
}

/// Everything the analysis concluded about a resource set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub detected_patterns: Vec<ArchitecturePattern>,
    pub primary_pattern: ArchitecturePattern,
    pub recommended_strategy: ChartStrategy,
    /// 0-100
    pub confidence: u32,
    pub best_practices: Vec<BestPractice>,
    pub metrics: AnalysisMetrics,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    /// Non-compliant findings at or above `min`
    pub fn violations_at_least(&self, min: Severity) -> impl Iterator<Item = &BestPractice> {
        self.best_practices
            .iter()
            .filter(move |bp| !bp.compliant && bp.severity >= min)
    }
}
