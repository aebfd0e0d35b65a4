//! Loading configuration files from disk.

use std::io::Write;

use advisor_config::{AdvisorConfig, ConfigError};
use tempfile::Builder;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml() {
    let file = write_temp(
        ".toml",
        r#"
[assumptions]
year_days = 365
broker_fee = 0.0006

[filter]
min_coupon_period = 28
max_coupon_period = 95

[curve_grid]
points = 200
"#,
    );
    let config = AdvisorConfig::load(file.path()).unwrap();
    assert_eq!(config.assumptions.year_days, 365);
    assert_eq!(config.assumptions.broker_fee, 0.0006);
    assert_eq!(config.filter.max_coupon_period, 95);
    assert_eq!(config.curve_grid.points, 200);
}

#[test]
fn test_load_json() {
    let file = write_temp(".json", r#"{"screening": {"parallel_threshold": 50}}"#);
    let config = AdvisorConfig::load(file.path()).unwrap();
    assert_eq!(config.screening.parallel_threshold, 50);
    assert_eq!(config.assumptions.tax_rate, 0.13);
}

#[test]
fn test_load_rejects_invalid_values() {
    let file = write_temp(".toml", "[curve_grid]\nstart = 5.0\nend = 1.0\n");
    let err = AdvisorConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "curve_grid.end"));
}

#[test]
fn test_load_rejects_malformed_file() {
    let file = write_temp(".json", "{ not json");
    assert!(matches!(
        AdvisorConfig::load(file.path()),
        Err(ConfigError::Deserialization(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AdvisorConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_load_unknown_extension() {
    let file = write_temp(".ini", "tax_rate = 0.13");
    assert!(matches!(
        AdvisorConfig::load(file.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}
