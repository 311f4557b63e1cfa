//! Project identifier to issue manager mapping.
//!
//! Starts empty. Entries are created on the first status event for a
//! project that resolves to a window, and live until the process exits.

use std::collections::HashMap;

use spork_config::PanelConfig;
use tracing::debug;

use crate::host::{self, EditorHost};
use crate::manager::ProjectIssueManager;

#[derive(Debug, Default)]
pub struct ProjectRegistry {
    managers: HashMap<String, ProjectIssueManager>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    pub fn get(&self, project: &str) -> Option<&ProjectIssueManager> {
        self.managers.get(project)
    }

    /// Existing manager for `project`, or a new one bound to the first
    /// window whose project file starts with `project`. `None` when no such
    /// window exists; nothing is inserted in that case.
    pub fn resolve<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        project: &str,
        panel: &PanelConfig,
    ) -> Option<&mut ProjectIssueManager> {
        if !self.managers.contains_key(project) {
            let window = host::window_bound_to(host, project)?;
            debug!(project, %window, "binding project to window");
            let manager = ProjectIssueManager::new(host, window, project, panel);
            self.managers.insert(project.to_string(), manager);
        }
        self.managers.get_mut(project)
    }
}
