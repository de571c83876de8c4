//! Graph construction
//!
//! The builder owns a priority-sorted list of relationship detectors. `build`
//! indexes the input, runs every detector for every resource, then groups the
//! result. Cancellation is checked once per resource and discards everything.

use super::grouping::group_resources;
use super::store::ResourceGraph;
use crate::error::{AnalysisError, Result};
use crate::models::ProcessedResource;
use crate::relationships::{self, RelationshipDetector};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct GraphBuilder {
    detectors: Vec<Box<dyn RelationshipDetector>>,
}

impl GraphBuilder {
    /// Builder with no detectors; grouping then relies on service names alone
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Register a detector, keeping the list sorted by descending priority
    pub fn register(&mut self, detector: Box<dyn RelationshipDetector>) {
        self.detectors.push(detector);
        self.detectors
            .sort_by_key(|d| std::cmp::Reverse(d.priority()));
    }

    pub fn with_detector(mut self, detector: Box<dyn RelationshipDetector>) -> Self {
        self.register(detector);
        self
    }

    /// Names of the registered detectors in execution order
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn build(
        &self,
        resources: Vec<ProcessedResource>,
        cancel: &CancellationToken,
    ) -> Result<ResourceGraph> {
        let start = Instant::now();
        let mut graph = ResourceGraph::new();
        for resource in resources {
            graph.add_resource(resource);
        }

        let all: Vec<&ProcessedResource> = graph.resources().collect();
        let mut edges = Vec::new();
        for resource in &all {
            if cancel.is_cancelled() {
                debug!("Graph build cancelled at {}", resource.key);
                return Err(AnalysisError::Cancelled);
            }
            for detector in &self.detectors {
                let found = detector.detect(resource, &all);
                if !found.is_empty() {
                    debug!(
                        "{}: {} relationship(s) from {}",
                        detector.name(),
                        found.len(),
                        resource.key
                    );
                }
                edges.extend(found);
            }
        }
        drop(all);

        for edge in edges {
            graph.add_relationship(edge);
        }
        group_resources(&mut graph);

        info!(
            "Built graph: {} resources, {} relationships, {} groups in {:?}",
            graph.resource_count(),
            graph.relationship_count(),
            graph.groups().len(),
            start.elapsed()
        );
        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A builder wired with every built-in relationship detector
pub fn default_graph_builder() -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    for detector in relationships::builtin_detectors() {
        builder.register(detector);
    }
    builder
}
