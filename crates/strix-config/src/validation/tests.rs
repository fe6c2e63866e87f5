//! Validation tests: each check rejects out-of-range values and the error
//! message names the offending key.

use super::validate;
use crate::schema::StrixConfig;
use strix_common::ConfigError;

fn expect_invalid(config: &StrixConfig, key: &str) {
    let err = validate(config).unwrap_err();
    match err {
        ConfigError::ValidationError(msg) => {
            assert!(msg.contains(key), "expected '{key}' in: {msg}");
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn default_config_is_valid() {
    assert!(validate(&StrixConfig::default()).is_ok());
}

#[test]
fn rejects_tiny_window() {
    let mut config = StrixConfig::default();
    config.window.width = 10;
    expect_invalid(&config, "window.width");
}

#[test]
fn rejects_zero_max_tabs() {
    let mut config = StrixConfig::default();
    config.session.max_tabs = 0;
    expect_invalid(&config, "session.max_tabs");
}

#[test]
fn rejects_excessive_max_tabs() {
    let mut config = StrixConfig::default();
    config.session.max_tabs = 1_000;
    expect_invalid(&config, "session.max_tabs");
}

#[test]
fn rejects_too_short_timeouts() {
    let mut config = StrixConfig::default();
    config.session.script_eval_timeout_ms = 10;
    expect_invalid(&config, "session.script_eval_timeout_ms");

    let mut config = StrixConfig::default();
    config.session.page_load_timeout_ms = 0;
    expect_invalid(&config, "session.page_load_timeout_ms");
}

#[test]
fn rejects_negative_tolerance() {
    let mut config = StrixConfig::default();
    config.session.resize_tolerance_px = -1;
    expect_invalid(&config, "session.resize_tolerance_px");
}

#[test]
fn rejects_bad_neutral_color() {
    let mut config = StrixConfig::default();
    config.engine.neutral_color = "red".into();
    expect_invalid(&config, "engine.neutral_color");
}

#[test]
fn rejects_zero_frame_rate() {
    let mut config = StrixConfig::default();
    config.engine.frame_rate = 0;
    expect_invalid(&config, "engine.frame_rate");
}

#[test]
fn collects_multiple_errors() {
    let mut config = StrixConfig::default();
    config.session.max_tabs = 0;
    config.engine.frame_rate = 0;

    let err = validate(&config).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("session.max_tabs"));
    assert!(msg.contains("engine.frame_rate"));
}
