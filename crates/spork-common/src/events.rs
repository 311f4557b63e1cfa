//! Typed views of the two payload shapes carried on the spork channels.
//!
//! The wire format is a flat string-keyed, string-valued dictionary. These
//! types are what remains after the dictionary has been decoded; the field
//! name constants are shared by the decoder and by anything that posts.

pub const FIELD_TYPE: &str = "type";
pub const FIELD_STRING: &str = "string";
pub const FIELD_PROJECT: &str = "project";
pub const FIELD_PATH: &str = "path";
pub const FIELD_LINE: &str = "line";
pub const FIELD_ISSUE: &str = "issue";

pub const TYPE_START: &str = "start";
pub const TYPE_ISSUE: &str = "issue";
pub const TYPE_STOP: &str = "stop";

/// A single diagnostic reported by the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub line: String,
    pub text: String,
}

impl Issue {
    /// Panel line in `path:line issue-text` form.
    pub fn panel_line(&self) -> String {
        format!("{}:{} {}", self.path, self.line, self.text)
    }
}

/// What a status event asks the project's issue manager to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Start,
    Issue(Issue),
    Stop,
}

impl StatusKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            StatusKind::Start => TYPE_START,
            StatusKind::Issue(_) => TYPE_ISSUE,
            StatusKind::Stop => TYPE_STOP,
        }
    }
}

/// A decoded message from the status/issue channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub project: String,
    /// Free-form status text the build tool attaches to some events.
    pub string: Option<String>,
    pub kind: StatusKind,
}

impl StatusEvent {
    /// Flatten back into wire key/value pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (FIELD_TYPE, self.kind.type_name().to_string()),
            (FIELD_PROJECT, self.project.clone()),
        ];
        if let Some(string) = &self.string {
            pairs.push((FIELD_STRING, string.clone()));
        }
        if let StatusKind::Issue(issue) = &self.kind {
            pairs.push((FIELD_PATH, issue.path.clone()));
            pairs.push((FIELD_LINE, issue.line.clone()));
            pairs.push((FIELD_ISSUE, issue.text.clone()));
        }
        pairs
    }
}

/// A decoded message from the open-file channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub project: String,
    pub path: String,
    pub line: String,
}

impl OpenRequest {
    /// `project/path`, the absolute location of the file to open.
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.project, self.path)
    }

    /// `project/path:line`, the host's encoded-position address.
    pub fn encoded_position(&self) -> String {
        format!("{}:{}", self.full_path(), self.line)
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (FIELD_PROJECT, self.project.clone()),
            (FIELD_PATH, self.path.clone()),
            (FIELD_LINE, self.line.clone()),
        ]
    }
}
