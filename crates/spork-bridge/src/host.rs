//! Port to the host editor.
//!
//! The bridge never touches editor internals directly; everything it needs
//! from windows, panels and the file opener goes through [`EditorHost`].

use serde_json::{json, Value};
use spork_common::{PanelId, WindowId};
use spork_platform::HostTimer;

/// Text commands run against an output panel view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    EraseView,
    Append { characters: String },
}

impl PanelCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PanelCommand::EraseView => "erase_view",
            PanelCommand::Append { .. } => "append",
        }
    }

    pub fn args(&self) -> Value {
        match self {
            PanelCommand::EraseView => json!({}),
            PanelCommand::Append { characters } => json!({ "characters": characters }),
        }
    }
}

/// Window-level commands toggling panel visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    ShowPanel { panel: String },
    HidePanel { panel: String },
}

impl WindowCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WindowCommand::ShowPanel { .. } => "show_panel",
            WindowCommand::HidePanel { .. } => "hide_panel",
        }
    }

    pub fn args(&self) -> Value {
        match self {
            WindowCommand::ShowPanel { panel } | WindowCommand::HidePanel { panel } => {
                json!({ "panel": panel })
            }
        }
    }
}

/// Everything the bridge consumes from the editor.
pub trait EditorHost: HostTimer {
    fn windows(&self) -> Vec<WindowId>;

    /// Project file the window is bound to, if any.
    fn project_file_name(&self, window: WindowId) -> Option<String>;

    fn has_open_file(&self, window: WindowId, path: &str) -> bool;

    fn create_output_panel(&self, window: WindowId, name: &str) -> PanelId;
    fn set_panel_setting(&self, panel: PanelId, key: &str, value: Value);
    fn assign_syntax(&self, panel: PanelId, syntax: &str);
    fn run_panel_command(&self, panel: PanelId, command: &PanelCommand);
    fn run_window_command(&self, window: WindowId, command: &WindowCommand);

    /// Host-level request to open `path` in whatever window the host picks.
    fn open_file(&self, path: &str);

    /// Open a file addressed as `path:line` in `window`.
    fn open_file_at(&self, window: WindowId, encoded_position: &str);
}

/// First window whose project file name starts with `project`.
pub fn window_bound_to<H: EditorHost + ?Sized>(host: &H, project: &str) -> Option<WindowId> {
    host.windows().into_iter().find(|window| {
        host.project_file_name(*window)
            .is_some_and(|name| name.starts_with(project))
    })
}

/// First window that already has `path` open.
pub fn window_with_file<H: EditorHost + ?Sized>(host: &H, path: &str) -> Option<WindowId> {
    host.windows()
        .into_iter()
        .find(|window| host.has_open_file(*window, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn command_names_and_args() {
        let append = PanelCommand::Append {
            characters: "a.js:1 oops\n".into(),
        };
        assert_eq!(append.name(), "append");
        assert_eq!(append.args(), json!({ "characters": "a.js:1 oops\n" }));
        assert_eq!(PanelCommand::EraseView.name(), "erase_view");

        let show = WindowCommand::ShowPanel {
            panel: "output.BuildSpork".into(),
        };
        assert_eq!(show.name(), "show_panel");
        assert_eq!(show.args(), json!({ "panel": "output.BuildSpork" }));
        let hide = WindowCommand::HidePanel {
            panel: "output.BuildSpork".into(),
        };
        assert_eq!(hide.name(), "hide_panel");
    }

    #[test]
    fn bound_window_is_prefix_match() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), Some("/Users/me/other.sublime-project"));
        host.add_window(WindowId(2), None);
        host.add_window(WindowId(3), Some("/Users/me/proj/proj.sublime-project"));

        assert_eq!(window_bound_to(&host, "/Users/me/proj"), Some(WindowId(3)));
        assert_eq!(window_bound_to(&host, "/Users/you"), None);
    }

    #[test]
    fn window_with_open_file() {
        let host = FakeHost::new();
        host.add_window(WindowId(1), None);
        host.add_window(WindowId(2), None);
        host.open_in(WindowId(2), "/p/a.js");

        assert_eq!(window_with_file(&host, "/p/a.js"), Some(WindowId(2)));
        assert_eq!(window_with_file(&host, "/p/b.js"), None);
    }
}
