//! Recording editor host used by the bridge tests.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use serde_json::Value;
use spork_common::{PanelId, WindowId};
use spork_platform::HostTimer;

use crate::host::{EditorHost, PanelCommand, WindowCommand};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreatePanel { window: WindowId, name: String },
    SetSetting { panel: PanelId, key: String, value: Value },
    AssignSyntax { panel: PanelId, syntax: String },
    Panel { panel: PanelId, command: PanelCommand },
    Window { window: WindowId, command: WindowCommand },
    OpenFile { path: String },
    OpenFileAt { window: WindowId, position: String },
}

struct FakeWindow {
    id: WindowId,
    project_file: Option<String>,
    open_files: Vec<String>,
}

type Timer = (Duration, Box<dyn FnOnce()>);

#[derive(Default)]
pub struct FakeHost {
    windows: RefCell<Vec<FakeWindow>>,
    calls: RefCell<Vec<HostCall>>,
    next_panel: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    /// Window that receives files opened through `open_file`.
    opens_into: Cell<Option<WindowId>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&self, id: WindowId, project_file: Option<&str>) {
        self.windows.borrow_mut().push(FakeWindow {
            id,
            project_file: project_file.map(str::to_string),
            open_files: Vec::new(),
        });
    }

    pub fn open_in(&self, window: WindowId, path: &str) {
        if let Some(w) = self.windows.borrow_mut().iter_mut().find(|w| w.id == window) {
            w.open_files.push(path.to_string());
        }
    }

    pub fn set_opens_into(&self, window: Option<WindowId>) {
        self.opens_into.set(window);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn panel_commands(&self) -> Vec<PanelCommand> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                HostCall::Panel { command, .. } => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn window_commands(&self) -> Vec<WindowCommand> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                HostCall::Window { command, .. } => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn created_panels(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, HostCall::CreatePanel { .. }))
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Fire every queued timer once; callbacks may queue new ones.
    pub fn fire_timers(&self) -> usize {
        let due: Vec<Timer> = self.timers.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl HostTimer for FakeHost {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.timers.borrow_mut().push((delay, callback));
    }
}

impl EditorHost for FakeHost {
    fn windows(&self) -> Vec<WindowId> {
        self.windows.borrow().iter().map(|w| w.id).collect()
    }

    fn project_file_name(&self, window: WindowId) -> Option<String> {
        self.windows
            .borrow()
            .iter()
            .find(|w| w.id == window)
            .and_then(|w| w.project_file.clone())
    }

    fn has_open_file(&self, window: WindowId, path: &str) -> bool {
        self.windows
            .borrow()
            .iter()
            .any(|w| w.id == window && w.open_files.iter().any(|f| f == path))
    }

    fn create_output_panel(&self, window: WindowId, name: &str) -> PanelId {
        let id = self.next_panel.get() + 1;
        self.next_panel.set(id);
        self.record(HostCall::CreatePanel {
            window,
            name: name.to_string(),
        });
        PanelId(id)
    }

    fn set_panel_setting(&self, panel: PanelId, key: &str, value: Value) {
        self.record(HostCall::SetSetting {
            panel,
            key: key.to_string(),
            value,
        });
    }

    fn assign_syntax(&self, panel: PanelId, syntax: &str) {
        self.record(HostCall::AssignSyntax {
            panel,
            syntax: syntax.to_string(),
        });
    }

    fn run_panel_command(&self, panel: PanelId, command: &PanelCommand) {
        self.record(HostCall::Panel {
            panel,
            command: command.clone(),
        });
    }

    fn run_window_command(&self, window: WindowId, command: &WindowCommand) {
        self.record(HostCall::Window {
            window,
            command: command.clone(),
        });
    }

    fn open_file(&self, path: &str) {
        self.record(HostCall::OpenFile {
            path: path.to_string(),
        });
        if let Some(window) = self.opens_into.get() {
            self.open_in(window, path);
        }
    }

    fn open_file_at(&self, window: WindowId, encoded_position: &str) {
        self.record(HostCall::OpenFileAt {
            window,
            position: encoded_position.to_string(),
        });
    }
}
