//! Decoding of notification payload dictionaries into typed events.

use spork_common::events::{
    FIELD_ISSUE, FIELD_LINE, FIELD_PATH, FIELD_PROJECT, FIELD_STRING, FIELD_TYPE, TYPE_ISSUE,
    TYPE_START, TYPE_STOP,
};
use spork_common::{Issue, NativeError, OpenRequest, StatusEvent, StatusKind};
use spork_platform::NativeDictionary;
use tracing::debug;

/// Named-field view over one delivered payload. Only valid inside the
/// callback that received the dictionary.
pub struct EventPayload<'a> {
    dict: NativeDictionary<'a>,
}

impl<'a> EventPayload<'a> {
    pub fn new(dict: NativeDictionary<'a>) -> Self {
        Self { dict }
    }

    pub fn field(&self, name: &str) -> Result<String, NativeError> {
        self.dict.get_string(name)
    }

    pub fn optional(&self, name: &str) -> Result<Option<String>, NativeError> {
        self.dict.get_optional(name)
    }

    /// Decode a status-channel payload.
    ///
    /// `Ok(None)` for a `type` this bridge does not handle. `type` and
    /// `project` are required; an `issue` additionally requires `path`,
    /// `line` and `issue`.
    pub fn status_event(&self) -> Result<Option<StatusEvent>, NativeError> {
        let type_name = self.field(FIELD_TYPE)?;
        let string = self.optional(FIELD_STRING)?;
        let project = self.field(FIELD_PROJECT)?;

        let kind = match type_name.as_str() {
            TYPE_START => StatusKind::Start,
            TYPE_STOP => StatusKind::Stop,
            TYPE_ISSUE => StatusKind::Issue(Issue {
                path: self.field(FIELD_PATH)?,
                line: self.field(FIELD_LINE)?,
                text: self.field(FIELD_ISSUE)?,
            }),
            other => {
                debug!(event_type = other, %project, "ignoring unhandled status type");
                return Ok(None);
            }
        };

        Ok(Some(StatusEvent {
            project,
            string,
            kind,
        }))
    }

    /// Decode an open-channel payload; all three fields are required.
    pub fn open_request(&self) -> Result<OpenRequest, NativeError> {
        Ok(OpenRequest {
            project: self.field(FIELD_PROJECT)?,
            path: self.field(FIELD_PATH)?,
            line: self.field(FIELD_LINE)?,
        })
    }
}
