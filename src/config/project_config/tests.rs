use super::*;
use tempfile::TempDir;

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("ImagePolicyChecker"), "image-policy");
    assert_eq!(normalize_name("image_policy"), "image-policy");
    assert_eq!(normalize_name("image-policy"), "image-policy");
    assert_eq!(normalize_name("PDBChecker"), "pdb");
    assert_eq!(normalize_name("VendorDetector"), "vendor");
}

#[test]
fn test_defaults() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.vendor_api_group, DEFAULT_VENDOR_API_GROUP);
    assert_eq!(config.report.max_affected, 5);
    assert_eq!(config.report.max_action_items, 10);
    assert!(config.is_checker_enabled("anything"));
    assert!(config.is_pattern_enabled("anything"));
}

#[test]
fn test_parse_toml() {
    let config: AnalyzerConfig = toml::from_str(
        r#"
vendor_api_group = "acme.io"

[checkers.image_policy]
enabled = false

[checkers.qos-class]
enabled = true

[patterns.operator]
enabled = false

[report]
max_affected = 3
"#,
    )
    .expect("parse");

    assert_eq!(config.vendor_api_group, "acme.io");
    assert!(!config.is_checker_enabled("image-policy"));
    assert!(!config.is_checker_enabled("ImagePolicyChecker"));
    assert!(config.is_checker_enabled("qos-class"));
    assert!(!config.is_pattern_enabled("operator"));
    assert_eq!(config.report.max_affected, 3);
    assert_eq!(config.report.max_action_items, 10);
    assert_eq!(config.disabled_checkers(), vec!["image-policy".to_string()]);
}

#[test]
fn test_sample_config_parses() {
    let config: AnalyzerConfig = toml::from_str(SAMPLE_CONFIG).expect("sample parses");
    assert_eq!(config.vendor_api_group, DEFAULT_VENDOR_API_GROUP);
    assert!(config.checkers.is_empty());
}

#[test]
fn test_load_prefers_toml() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("chartplan.toml"), "vendor_api_group = \"toml.io\"\n")
        .expect("write");
    std::fs::write(
        dir.path().join(".chartplanrc.json"),
        r#"{"vendor_api_group": "json.io"}"#,
    )
    .expect("write");

    assert_eq!(load_config(dir.path()).vendor_api_group, "toml.io");
}

#[test]
fn test_malformed_file_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("chartplan.toml"), "vendor_api_group = [").expect("write");
    std::fs::write(
        dir.path().join(".chartplanrc.json"),
        r#"{"report": {"max_action_items": 4}}"#,
    )
    .expect("write");

    let config = load_config(dir.path());
    assert_eq!(config.report.max_action_items, 4);
    assert_eq!(config.vendor_api_group, DEFAULT_VENDOR_API_GROUP);
}

#[test]
fn test_missing_files_give_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let config = load_config(dir.path());
    assert_eq!(config.vendor_api_group, DEFAULT_VENDOR_API_GROUP);
}

#[test]
fn test_explicit_file_errors() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_config_file(&missing),
        Err(AnalysisError::Config { .. })
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{").expect("write");
    assert!(load_config_file(&bad).is_err());
}
