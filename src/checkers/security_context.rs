//! Container security context: non-root user, read-only root filesystem,
//! privileged mode

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::{containers, is_true};

const RUN_AS_ROOT: Rule = Rule {
    id: "security-run-as-non-root",
    title: "Containers may run as root",
    description: "securityContext.runAsNonRoot is missing or false.",
    severity: Severity::Error,
    auto_fixable: true,
    compliant: false,
    recommendations: &["Set securityContext.runAsNonRoot: true and a non-zero runAsUser"],
};

const WRITABLE_ROOT_FS: Rule = Rule {
    id: "security-read-only-root-filesystem",
    title: "Containers have a writable root filesystem",
    description: "securityContext.readOnlyRootFilesystem is missing or false.",
    severity: Severity::Warning,
    auto_fixable: true,
    compliant: false,
    recommendations: &[
        "Set securityContext.readOnlyRootFilesystem: true",
        "Mount emptyDir volumes for paths that need to be writable",
    ],
};

const PRIVILEGED: Rule = Rule {
    id: "security-privileged-container",
    title: "Privileged containers",
    description: "Privileged containers have full access to the host.",
    severity: Severity::Critical,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Remove securityContext.privileged and grant only the capabilities needed"],
};

pub struct SecurityContextChecker;

impl BestPracticeChecker for SecurityContextChecker {
    fn name(&self) -> &'static str {
        "security-context"
    }

    fn category(&self) -> &'static str {
        "security"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let mut root = Vec::new();
        let mut writable = Vec::new();
        let mut privileged = Vec::new();

        for workload in workloads(graph) {
            let Some(containers) = containers(&workload.values) else {
                continue;
            };
            if containers
                .iter()
                .any(|c| !is_true(c, &["securityContext", "runAsNonRoot"]))
            {
                root.push(workload.key.clone());
            }
            if containers
                .iter()
                .any(|c| !is_true(c, &["securityContext", "readOnlyRootFilesystem"]))
            {
                writable.push(workload.key.clone());
            }
            if containers
                .iter()
                .any(|c| is_true(c, &["securityContext", "privileged"]))
            {
                privileged.push(workload.key.clone());
            }
        }

        let mut findings = Vec::new();
        RUN_AS_ROOT.report(self.category(), root, &mut findings);
        WRITABLE_ROOT_FS.report(self.category(), writable, &mut findings);
        PRIVILEGED.report(self.category(), privileged, &mut findings);
        findings
    }
}
