//! Spork bridge configuration.
//!
//! TOML-based configuration for the notification channels, poll cadence,
//! the issue output panel, and logging. Every section has defaults so an
//! empty or partial file is valid.

pub mod schema;
pub mod settings;
pub mod validation;

pub use schema::{
    ChannelConfig, LoggingConfig, PanelConfig, PollConfig, SporkConfig, CONFIG_SCHEMA_VERSION,
};

pub use settings::{load_or_seed, settings_path, SETTINGS_FILE_NAME};

use std::path::Path;

use spork_common::ConfigError;

/// Load the settings for a host, seeding the file on first run.
pub fn load_settings(host_dir: Option<&Path>) -> Result<SporkConfig, ConfigError> {
    load_or_seed(&settings_path(host_dir)?)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &SporkConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
