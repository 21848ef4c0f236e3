use super::*;
use tempfile::TempDir;

#[test]
fn test_minimal_config_uses_defaults() {
    let config = Config::from_yaml("name: wa_ev").unwrap();
    assert_eq!(config.name, "wa_ev");
    assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
    assert_eq!(config.source.timeout_secs, 300);
    assert_eq!(config.database.path, "ev_warehouse.duckdb");
    assert_eq!(config.imputation.fallback_model_year, 2020);
}

#[test]
fn test_full_config() {
    let yaml = r#"
name: wa_ev
source:
  url: https://example.com/ev.csv
  timeout_secs: 30
database:
  path: ":memory:"
imputation:
  fallback_model_year: 2018
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.source.url, "https://example.com/ev.csv");
    assert_eq!(config.source.timeout_secs, 30);
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.imputation.fallback_model_year, 2018);
}

#[test]
fn test_unknown_fields_rejected() {
    let err = Config::from_yaml("name: x\nmaterialization: table").unwrap_err();
    assert!(matches!(err, CoreError::YamlParse(_)));
}

#[test]
fn test_invalid_values_rejected() {
    let err = Config::from_yaml("name: ''").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));

    let err = Config::from_yaml("name: x\nsource:\n  url: ftp://nope").unwrap_err();
    assert!(err.to_string().contains("source.url"));

    let err = Config::from_yaml("name: x\nsource:\n  timeout_secs: 0").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_from_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("evwh.yaml"), "name: from_dir\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "from_dir");
}

#[test]
fn test_load_from_dir_missing() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));

    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_default_yaml_round_trips() {
    let yaml = Config::default().to_yaml().unwrap();
    assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
}
