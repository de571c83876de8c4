//! Pattern detector trait
//!
//! A pattern detector inspects the finished resource graph and reports which
//! architecture patterns it recognises. Detectors are pure: the same graph
//! always yields the same labels, and nothing in the graph is modified.

use crate::graph::ResourceGraph;
use crate::models::ArchitecturePattern;

/// Trait for all architecture pattern detectors
///
/// # Example Implementation
///
/// ```ignore
/// pub struct BatchHeavyDetector;
///
/// impl PatternDetector for BatchHeavyDetector {
///     fn name(&self) -> &'static str {
///         "batch-heavy"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags resource sets dominated by Jobs"
///     }
///
///     fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
///         vec![]
///     }
/// }
/// ```
pub trait PatternDetector: Send + Sync {
    /// Unique identifier, used for enabling/disabling from config
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector recognises
    fn description(&self) -> &'static str;

    /// Zero or more patterns present in the graph. A detector may report the
    /// same pattern more than once; each report counts towards the primary pattern.
    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern>;
}
