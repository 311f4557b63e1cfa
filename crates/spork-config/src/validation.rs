//! Full configuration validation.
//!
//! Validates numeric ranges, channel names, and panel regexes.

use crate::schema::SporkConfig;
use spork_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SporkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Channels
    validate_non_empty(&mut errors, "channels.event", &config.channels.event);
    validate_non_empty(&mut errors, "channels.open", &config.channels.open);
    if config.channels.event == config.channels.open {
        errors.push(format!(
            "channels.event and channels.open must differ (both \"{}\")",
            config.channels.event
        ));
    }

    // Poll cadence
    validate_range(&mut errors, "poll.interval_ms", config.poll.interval_ms, 10, 5000);

    // Panel
    validate_non_empty(&mut errors, "panel.name", &config.panel.name);
    validate_regex(&mut errors, "panel.result_file_regex", &config.panel.result_file_regex);
    validate_regex(&mut errors, "panel.result_line_regex", &config.panel.result_line_regex);

    // Logging
    validate_non_empty(&mut errors, "logging.level", &config.logging.level);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn validate_regex(errors: &mut Vec<String>, name: &str, pattern: &str) {
    if let Err(e) = regex::Regex::new(pattern) {
        errors.push(format!("{name} is not a valid regex: {e}"));
    }
}
