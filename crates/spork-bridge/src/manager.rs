//! Per-project issue panel state.

use serde_json::Value;
use spork_common::{PanelId, WindowId};
use spork_config::PanelConfig;
use tracing::debug;

use crate::host::{EditorHost, PanelCommand, WindowCommand};

/// Issue list for one project, bound to one window and its output panel.
///
/// `start` clears the panel and resets the count, each `issue` appends a
/// line and reveals the panel, and `stop` hides the panel if the run
/// produced no issues.
#[derive(Debug)]
pub struct ProjectIssueManager {
    window: WindowId,
    panel: PanelId,
    panel_name: String,
    issue_count: usize,
    panel_visible: bool,
}

impl ProjectIssueManager {
    /// Create and configure the output panel in `window`.
    pub fn new<H: EditorHost + ?Sized>(
        host: &H,
        window: WindowId,
        project: &str,
        config: &PanelConfig,
    ) -> Self {
        let panel = host.create_output_panel(window, &config.name);

        let settings = [
            ("result_file_regex", Value::from(config.result_file_regex.as_str())),
            ("result_line_regex", Value::from(config.result_line_regex.as_str())),
            ("result_base_dir", Value::from(project)),
            ("word_wrap", Value::from(config.word_wrap)),
            ("line_numbers", Value::from(config.line_numbers)),
            ("gutter", Value::from(config.gutter)),
            ("scroll_past_end", Value::from(config.scroll_past_end)),
        ];
        for (key, value) in settings {
            host.set_panel_setting(panel, key, value);
        }
        host.assign_syntax(panel, &config.syntax);

        debug!(%window, %panel, project, "created issue panel");

        Self {
            window,
            panel,
            panel_name: config.qualified_name(),
            issue_count: 0,
            panel_visible: false,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn issue_count(&self) -> usize {
        self.issue_count
    }

    /// Whether the last visibility command sent was `show_panel`.
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn handle_start<H: EditorHost + ?Sized>(&mut self, host: &H) {
        self.issue_count = 0;
        host.run_panel_command(self.panel, &PanelCommand::EraseView);
    }

    pub fn handle_issue<H: EditorHost + ?Sized>(&mut self, host: &H, line: &str) {
        host.run_panel_command(
            self.panel,
            &PanelCommand::Append {
                characters: format!("{line}\n"),
            },
        );

        self.issue_count += 1;
        if self.issue_count > 0 {
            self.set_visible(host, true);
        }
    }

    pub fn handle_stop<H: EditorHost + ?Sized>(&mut self, host: &H) {
        if self.issue_count == 0 {
            self.set_visible(host, false);
        }
    }

    fn set_visible<H: EditorHost + ?Sized>(&mut self, host: &H, visible: bool) {
        let panel = self.panel_name.clone();
        let command = if visible {
            WindowCommand::ShowPanel { panel }
        } else {
            WindowCommand::HidePanel { panel }
        };
        host.run_window_command(self.window, &command);
        self.panel_visible = visible;
    }
}
