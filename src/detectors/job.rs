//! Batch workload detection

use super::base::PatternDetector;
use crate::graph::ResourceGraph;
use crate::models::{ArchitecturePattern, KIND_CRONJOB, KIND_JOB};

pub struct JobDetector;

impl PatternDetector for JobDetector {
    fn name(&self) -> &'static str {
        "job"
    }

    fn description(&self) -> &'static str {
        "Jobs or CronJobs"
    }

    fn detect(&self, graph: &ResourceGraph) -> Vec<ArchitecturePattern> {
        let found = graph
            .resources()
            .any(|r| r.kind() == KIND_JOB || r.kind() == KIND_CRONJOB);
        if found {
            vec![ArchitecturePattern::Job]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::tests::graph_of;

    #[test]
    fn test_reports_job_once() {
        let graph = graph_of(&[("Job", "migrate", "db"), ("CronJob", "backup", "db")]);
        assert_eq!(JobDetector.detect(&graph), vec![ArchitecturePattern::Job]);
    }
}
