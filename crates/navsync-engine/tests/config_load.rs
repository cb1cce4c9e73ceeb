//! TOML config loading (behind the `config-load` feature).

use navsync_engine::{ConfigError, EngineConfig};
use std::time::Duration;

#[test]
fn loads_explicit_values() {
    let config = EngineConfig::from_toml_str(
        "debounce_ms = 80\npoll_interval_ms = 250\n",
    )
    .unwrap();
    assert_eq!(config.debounce_window, Duration::from_millis(80));
    assert_eq!(config.poll_interval, Duration::from_millis(250));
}

#[test]
fn missing_keys_keep_defaults() {
    let config = EngineConfig::from_toml_str("debounce_ms = 100\n").unwrap();
    assert_eq!(config.debounce_window, Duration::from_millis(100));
    assert_eq!(config.poll_interval, Duration::from_millis(400));
}

#[test]
fn out_of_range_values_are_all_reported() {
    let err = EngineConfig::from_toml_str(
        "debounce_ms = 5\npoll_interval_ms = 9999\n",
    )
    .unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].contains("debounce_ms"));
            assert!(errors[1].contains("poll_interval_ms"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineConfig::from_toml_str("debouce_ms = 80\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn syntax_errors_surface_as_toml_errors() {
    let err = EngineConfig::from_toml_str("debounce_ms = = 80").unwrap_err();
    assert!(err.to_string().contains("TOML parse error"));
}
