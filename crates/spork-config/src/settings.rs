//! Locating, seeding and parsing the bridge's `spork.toml`.
//!
//! An editor host normally owns a per-user settings directory and passes it
//! in; without one the file lives under the platform config dir. A missing
//! file is seeded with a commented template so users have something to edit.

use std::path::{Path, PathBuf};

use spork_common::ConfigError;
use tracing::{debug, info};

use crate::schema::SporkConfig;
use crate::validation;

pub const SETTINGS_FILE_NAME: &str = "spork.toml";

/// Resolve the settings file for a host.
///
/// `host_dir` is the editor's user settings directory, if it has one.
/// Otherwise `<config_dir>/spork/spork.toml`.
pub fn settings_path(host_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let dir = match host_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::config_dir()
            .ok_or_else(|| ConfigError::ParseError("no user config directory".into()))?
            .join("spork"),
    };
    Ok(dir.join(SETTINGS_FILE_NAME))
}

/// Parse settings text. Absent keys take defaults; a config that parses but
/// fails validation is rejected so the bridge never subscribes with it.
pub fn parse_settings(text: &str) -> Result<SporkConfig, ConfigError> {
    let config: SporkConfig = toml::from_str(text)
        .map_err(|e| ConfigError::ParseError(format!("invalid {SETTINGS_FILE_NAME}: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Read and parse an existing settings file.
pub fn read_settings(path: &Path) -> Result<SporkConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };
    let config = parse_settings(&text)?;
    debug!(path = %path.display(), "settings read");
    Ok(config)
}

/// Read `path`, seeding it with the template first if it does not exist.
pub fn load_or_seed(path: &Path) -> Result<SporkConfig, ConfigError> {
    match read_settings(path) {
        Err(ConfigError::FileNotFound(_)) => {
            seed_settings(path)?;
            Ok(SporkConfig::default())
        }
        other => other,
    }
}

/// Write the commented template to `path`, creating parent directories.
pub fn seed_settings(path: &Path) -> Result<(), ConfigError> {
    let write = |p: &Path| -> std::io::Result<()> {
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(p, SETTINGS_TEMPLATE)
    };
    write(path).map_err(|e| {
        ConfigError::ParseError(format!("cannot seed {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), "seeded spork settings");
    Ok(())
}

const SETTINGS_TEMPLATE: &str = r#"# spork bridge settings. Every key is optional.

[channels]
# event = "net.musictheory.spork.event"
# open = "net.musictheory.spork.open"

[poll]
# Milliseconds between delivery pumps, 10-5000.
# interval_ms = 100

[panel]
# name = "BuildSpork"
# syntax = "Packages/Text/Plain text.tmLanguage"
# result_file_regex = "^([^:]*):([0-9]+):?([0-9]+)?:? (.*)$"
# result_line_regex = ""
# word_wrap = true
# line_numbers = false
# gutter = false
# scroll_past_end = false

[logging]
# level = "spork=info"
"#;
