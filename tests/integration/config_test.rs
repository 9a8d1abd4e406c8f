//! Configuration loading tests using real files on disk.

use nl_ask::config::Config;
use std::path::Path;

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
golden_questions = ["Show recent transactions", "List customers"]

[backend]
base_url = "http://db.example.com:8000"
timeout_secs = 15

[backends.staging]
base_url = "https://staging.example.com"
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.backend.base_url, "http://db.example.com:8000");
    assert_eq!(config.backend.timeout_secs, Some(15));
    assert_eq!(
        config.get_profile(Some("staging")).unwrap().base_url,
        "https://staging.example.com"
    );
    assert_eq!(config.golden_questions.len(), 2);
}

#[test]
fn test_missing_file_yields_defaults() {
    let config = Config::load_from_file(Path::new("/nonexistent/nl-ask/config.toml")).unwrap();
    assert_eq!(config.backend.base_url, "http://localhost:8000");
    assert_eq!(config.golden_questions.len(), 4);
}

#[test]
fn test_malformed_file_is_config_error_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "backend = \"not a table\"").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert_eq!(err.category(), "Configuration Error");
    assert!(err.message().contains(path.to_str().unwrap()));
}

#[test]
fn test_unknown_profile_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[backend]\nbase_url = \"http://localhost:8000\"\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert!(config.get_profile(Some("prod")).is_none());
}

#[test]
fn test_default_golden_questions() {
    let config = Config::default();
    assert_eq!(
        config.golden_questions,
        vec![
            "Show top 5 customers by balance",
            "Show recent transactions",
            "Show accounts in Istanbul",
            "List customers",
        ]
    );
}
