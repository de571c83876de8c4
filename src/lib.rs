//! chartplan - packaging analysis for Kubernetes resource sets
//!
//! Builds a relationship graph over already-processed resources, groups them
//! into services, detects architecture patterns, runs best-practice checks
//! and recommends how to package everything into charts.
//!
//! ```text
//! resources ──► GraphBuilder ──► ResourceGraph (+ service groups)
//!                                     │
//!            ┌────────────────────────┼────────────────────────┐
//!            ▼                        ▼                        ▼
//!      MetricsEngine           PatternEngine           BestPracticeChecker
//!            └────────────────────────┼────────────────────────┘
//!                                     ▼
//!                          strategy recommendation
//!                                     ▼
//!                            Report ──► text / json / markdown / summary
//! ```

pub mod checkers;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod graph;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod relationships;
pub mod reporters;
pub mod scoring;
pub mod value;

pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use pipeline::{analyze_resources, Analysis, Analyzer};
