//! Container image references: pinned tags or digests

use super::{workloads, BestPracticeChecker, Rule};
use crate::graph::ResourceGraph;
use crate::models::{BestPractice, Severity};
use crate::value::{containers, Value};
use regex::Regex;
use std::sync::OnceLock;

const UNPINNED_IMAGE: Rule = Rule {
    id: "image-unpinned-tag",
    title: "Images without a pinned tag",
    description: "Images with no tag, or the `latest` tag, change underneath a running release.",
    severity: Severity::Warning,
    auto_fixable: false,
    compliant: false,
    recommendations: &["Pin every image to a version tag or an immutable digest"],
};

/// `[registry[:port]/]path[:tag][@digest]`
fn image_reference() -> Option<&'static Regex> {
    static IMAGE_REFERENCE: OnceLock<Option<Regex>> = OnceLock::new();
    IMAGE_REFERENCE
        .get_or_init(|| {
            Regex::new(
                r"^(?P<name>(?:[^/@]+/)*[^:/@]+)(?::(?P<tag>\w[\w.-]*))?(?:@(?P<digest>[A-Za-z0-9]+:[A-Fa-f0-9]+))?$",
            )
            .ok()
        })
        .as_ref()
}

/// True when `image` carries a digest or a tag other than `latest`
pub fn is_pinned(image: &str) -> bool {
    let Some(caps) = image_reference().and_then(|re| re.captures(image.trim())) else {
        return false;
    };
    if caps.name("digest").is_some() {
        return true;
    }
    caps.name("tag").is_some_and(|tag| tag.as_str() != "latest")
}

pub struct ImagePolicyChecker;

impl BestPracticeChecker for ImagePolicyChecker {
    fn name(&self) -> &'static str {
        "image-policy"
    }

    fn category(&self) -> &'static str {
        "images"
    }

    fn check(&self, graph: &ResourceGraph) -> Vec<BestPractice> {
        let affected: Vec<_> = workloads(graph)
            .filter(|w| {
                containers(&w.values).is_some_and(|list| {
                    list.iter()
                        .filter_map(|c| c.get("image").and_then(Value::as_str))
                        .any(|image| !is_pinned(image))
                })
            })
            .map(|w| w.key.clone())
            .collect();

        let mut findings = Vec::new();
        UNPINNED_IMAGE.report(self.category(), affected, &mut findings);
        findings
    }
}
