//! Reading resource sets
//!
//! Input is a JSON array. Each element is either a processed resource (it
//! has a `key`) or a raw manifest (`apiVersion`/`kind`/`metadata`). Raw
//! manifests get a values bag made of their spec with the pod spec folded
//! in, which is enough for every checker.

use crate::error::{AnalysisError, Result};
use crate::models::{ProcessedResource, ResourceKey};
use crate::relationships::pod_spec;
use crate::value::{Value, Values};
use std::collections::BTreeMap;
use tracing::debug;

/// Spec keys that hold nested templates rather than settings
const TEMPLATE_KEYS: [&str; 3] = ["template", "jobTemplate", "selector"];

/// Parse a JSON array of processed resources and/or raw manifests
pub fn parse_resources(json: &str) -> Result<Vec<ProcessedResource>> {
    let docs: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| AnalysisError::Input(format!("expected a JSON array of resources: {e}")))?;
    let mut resources = Vec::with_capacity(docs.len());
    for (index, doc) in docs.into_iter().enumerate() {
        if doc.get("key").is_some() {
            let resource = serde_json::from_value(doc)
                .map_err(|e| AnalysisError::Input(format!("resource #{index}: {e}")))?;
            resources.push(resource);
        } else {
            resources.push(from_manifest(Value::from(doc)));
        }
    }
    debug!("Parsed {} resource(s)", resources.len());
    Ok(resources)
}

/// Build a processed resource from a raw manifest
pub fn from_manifest(manifest: Value) -> ProcessedResource {
    let text = |path: &[&str]| {
        manifest
            .get_path(path)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let key = ResourceKey::from_api_version(
        &text(&["apiVersion"]),
        text(&["kind"]),
        text(&["metadata", "namespace"]),
        text(&["metadata", "name"]),
    );
    let labels: BTreeMap<String, String> = manifest
        .get_path(&["metadata", "labels"])
        .map(crate::relationships::string_map)
        .unwrap_or_default();

    let mut resource = ProcessedResource::new(key).with_manifest(manifest);
    resource.labels = labels;
    resource.values = manifest_values(&resource);
    resource
}

fn manifest_values(resource: &ProcessedResource) -> Values {
    let mut values: Values = resource
        .manifest
        .get("spec")
        .and_then(Value::as_map)
        .map(|spec| {
            spec.iter()
                .filter(|(k, _)| !TEMPLATE_KEYS.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    if let Some(pod) = pod_spec(resource) {
        for (k, v) in pod {
            values.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::containers;
    use serde_json::json;

    #[test]
    fn test_mixed_input() {
        let input = json!([
            {
                "key": {"group": "apps", "version": "v1", "kind": "Deployment", "namespace": "shop", "name": "web"},
                "service_name": "web",
                "values": {"replicas": 2}
            },
            {
                "apiVersion": "apps/v1",
                "kind": "StatefulSet",
                "metadata": {"name": "db", "namespace": "shop", "labels": {"app": "db"}},
                "spec": {
                    "serviceName": "db",
                    "replicas": 1,
                    "selector": {"matchLabels": {"app": "db"}},
                    "template": {"spec": {
                        "hostNetwork": false,
                        "containers": [{"name": "postgres", "image": "postgres:16"}]
                    }}
                }
            }
        ]);
        let resources = parse_resources(&input.to_string()).expect("parse");
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].service_name, "web");
        assert_eq!(resources[0].values.get("replicas").and_then(Value::as_i64), Some(2));

        let db = &resources[1];
        assert_eq!(db.key.group, "apps");
        assert_eq!(db.key.to_string(), "StatefulSet/shop/db");
        assert_eq!(db.labels.get("app").map(String::as_str), Some("db"));
        assert!(db.values.contains_key("serviceName"));
        assert!(!db.values.contains_key("template"));
        assert!(!db.values.contains_key("selector"));
        assert_eq!(containers(&db.values).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_not_an_array_is_an_error() {
        assert!(matches!(
            parse_resources("{\"kind\": \"Service\"}"),
            Err(AnalysisError::Input(_))
        ));
    }

    #[test]
    fn test_malformed_input_reports_input_error() {
        let err = parse_resources("not json").expect_err("should fail");
        assert!(matches!(err, AnalysisError::Input(_)));
        assert!(err.to_string().starts_with("invalid resource input:"), "{err}");

        let bad_key = json!([{"key": {"kind": 7}}]).to_string();
        let err = parse_resources(&bad_key).expect_err("should fail");
        assert!(err.to_string().contains("resource #0"), "{err}");
    }
}
