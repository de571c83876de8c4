//! Quantitative metrics, scores and strategy recommendation
//!
//! # Complexity (0-100, additive, capped)
//!
//! ```text
//! resources  >50: +30   >20: +20   >10: +10
//! services   >10: +30    >5: +20    >2: +10
//! + 10 × stateful services
//! + 2 × distinct kinds
//! ```
//!
//! # Coupling (0-100, lower is better)
//!
//! ```text
//! coupling = floor(cross-service edges × 100 / all edges)
//! ```
//!
//! An edge is cross-service when both endpoints resolve to a service and the
//! services differ. Dangling edges count in the denominator only. With one
//! group or no edges the score is 0.
//!
//! # Confidence (0-100)
//!
//! ```text
//! 50  + 20 (>20 resources) | + 10 (>10 resources)
//!     - 15 (>3 patterns)   | + 15 (exactly 1 pattern)
//!     + 15 (vendor-extension primary with vendor resources)
//! ```

mod metrics;
mod strategy;

pub use metrics::{complexity_score, coupling_score, MetricsEngine};
pub use strategy::{confidence, recommend_strategy, recommendations};
