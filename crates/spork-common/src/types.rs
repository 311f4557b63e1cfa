use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned identifier of an editor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Host-assigned identifier of an output panel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// The two distributed notification channels the bridge listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Status and issue stream (`start` / `issue` / `stop`).
    Event,
    /// Request to open a file at a line.
    Open,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Event, Channel::Open];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Event => f.write_str("event"),
            Channel::Open => f.write_str("open"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_display() {
        assert_eq!(WindowId(3).to_string(), "window-3");
        assert_eq!(PanelId(7).to_string(), "panel-7");
    }

    #[test]
    fn window_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(WindowId(1));
        set.insert(WindowId(2));
        set.insert(WindowId(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn channel_serialization() {
        let json = serde_json::to_string(&Channel::Open).unwrap();
        assert_eq!(json, "\"open\"");
        let parsed: Channel = serde_json::from_str("\"event\"").unwrap();
        assert_eq!(parsed, Channel::Event);
    }

    #[test]
    fn channel_all_is_distinct() {
        assert_ne!(Channel::ALL[0], Channel::ALL[1]);
    }
}
