//! Architecture pattern detectors
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PatternEngine                          │
//! │  - Holds the caller-wired detector list                     │
//! │  - Counts reports per pattern                               │
//! │  - Picks the primary pattern (or falls back on metrics)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PatternDetector Trait                     │
//! │  - name(): Unique identifier                                │
//! │  - detect(graph): Zero or more patterns                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Built-in detectors
//!
//! - `MicroservicesDetector` - microservices, stateless
//! - `StatefulDetector` - stateful, daemonset
//! - `JobDetector` - job
//! - `OperatorDetector` - operator
//! - `VendorDetector` - vendor-extension, sidecar

mod base;
mod engine;
mod job;
mod microservices;
mod operator;
mod stateful;
mod vendor;

pub use base::PatternDetector;
pub use engine::{fallback_pattern, PatternEngine, PatternSummary};
pub use job::JobDetector;
pub use microservices::MicroservicesDetector;
pub use operator::OperatorDetector;
pub use stateful::StatefulDetector;
pub use vendor::VendorDetector;

/// Every built-in pattern detector in evaluation order
pub fn builtin_detectors(vendor_api_group: &str) -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(MicroservicesDetector),
        Box::new(StatefulDetector),
        Box::new(JobDetector),
        Box::new(OperatorDetector),
        Box::new(VendorDetector::new(vendor_api_group)),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::graph::{group_resources, ResourceGraph};
    use crate::models::{ProcessedResource, ResourceKey};

    /// Graph of `(kind, name, service)` triples, already grouped
    pub(crate) fn graph_of(resources: &[(&str, &str, &str)]) -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        for (kind, name, service) in resources {
            graph.add_resource(
                ProcessedResource::new(ResourceKey::new("", "v1", *kind, "default", *name))
                    .with_service(*service),
            );
        }
        group_resources(&mut graph);
        graph
    }
}
