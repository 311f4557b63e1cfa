//! Configuration schema types for the spork bridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};
use spork_common::Channel;
use std::time::Duration;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_EVENT_CHANNEL: &str = "net.musictheory.spork.event";
pub const DEFAULT_OPEN_CHANNEL: &str = "net.musictheory.spork.open";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SporkConfig {
    pub channels: ChannelConfig,
    pub poll: PollConfig,
    pub panel: PanelConfig,
    pub logging: LoggingConfig,
}

/// Distributed notification names for the two channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub event: String,
    pub open: String,
}

impl ChannelConfig {
    pub fn name(&self, channel: Channel) -> &str {
        match channel {
            Channel::Event => &self.event,
            Channel::Open => &self.open,
        }
    }

    /// Reverse lookup of a delivered notification name.
    pub fn channel_for(&self, name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| self.name(*c) == name)
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event: DEFAULT_EVENT_CHANNEL.into(),
            open: DEFAULT_OPEN_CHANNEL.into(),
        }
    }
}

/// Cadence at which the host timer pumps the notification run loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u32,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 100 }
    }
}

/// Output panel created per project for the issue list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub name: String,
    pub syntax: String,
    pub result_file_regex: String,
    pub result_line_regex: String,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub gutter: bool,
    pub scroll_past_end: bool,
}

impl PanelConfig {
    /// Host-level identifier used by show/hide panel commands.
    pub fn qualified_name(&self) -> String {
        format!("output.{}", self.name)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            name: "BuildSpork".into(),
            syntax: "Packages/Text/Plain text.tmLanguage".into(),
            result_file_regex: "^([^:]*):([0-9]+):?([0-9]+)?:? (.*)$".into(),
            result_line_regex: String::new(),
            word_wrap: true,
            line_numbers: false,
            gutter: false,
            scroll_past_end: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive applied on top of `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "spork=info".into(),
        }
    }
}
