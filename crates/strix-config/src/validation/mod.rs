//! Full configuration validation.
//!
//! Validates all numeric ranges and color formats. Errors are collected
//! into a single `ConfigError` rather than failing at the first problem.

mod helpers;

#[cfg(test)]
mod tests;

use crate::colors::parse_hex_rgb;
use crate::schema::StrixConfig;
use helpers::{validate_range_u32, validate_range_u64, validate_range_usize};
use strix_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StrixConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_session(&mut errors, config);
    validate_engine(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_window(errors: &mut Vec<String>, config: &StrixConfig) {
    validate_range_u32(errors, "window.width", config.window.width, 200, 16_384);
    validate_range_u32(errors, "window.height", config.window.height, 200, 16_384);
}

fn validate_session(errors: &mut Vec<String>, config: &StrixConfig) {
    validate_range_usize(errors, "session.max_tabs", config.session.max_tabs, 1, 128);
    validate_range_u64(
        errors,
        "session.script_eval_timeout_ms",
        config.session.script_eval_timeout_ms,
        100,
        600_000,
    );
    validate_range_u64(
        errors,
        "session.page_load_timeout_ms",
        config.session.page_load_timeout_ms,
        100,
        600_000,
    );
    let tolerance = config.session.resize_tolerance_px;
    if !(0..=16).contains(&tolerance) {
        errors.push(format!(
            "session.resize_tolerance_px = {tolerance} is out of range [0, 16]"
        ));
    }
}

fn validate_engine(errors: &mut Vec<String>, config: &StrixConfig) {
    validate_range_u32(errors, "engine.frame_rate", config.engine.frame_rate, 1, 240);
    validate_range_u32(
        errors,
        "engine.sim_load_pumps",
        config.engine.sim_load_pumps,
        0,
        10_000,
    );
    if parse_hex_rgb(&config.engine.neutral_color).is_none() {
        errors.push(format!(
            "engine.neutral_color = '{}' is not a #rrggbb color",
            config.engine.neutral_color
        ));
    }
}
