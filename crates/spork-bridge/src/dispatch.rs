//! Routes decoded notifications to issue managers and the file opener.

use std::rc::Rc;

use spork_common::{BridgeError, Channel, OpenRequest, StatusEvent, StatusKind};
use spork_config::PanelConfig;
use spork_platform::{NativeDictionary, NotificationSink};
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::open;
use crate::payload::EventPayload;
use crate::registry::ProjectRegistry;

/// The event dispatcher. Owns the project registry for the life of the
/// bridge.
pub struct Dispatcher<H: EditorHost> {
    host: Rc<H>,
    panel: PanelConfig,
    registry: ProjectRegistry,
}

impl<H: EditorHost> Dispatcher<H> {
    pub fn new(host: Rc<H>, panel: PanelConfig) -> Self {
        Self {
            host,
            panel,
            registry: ProjectRegistry::new(),
        }
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// Decode `payload` for `channel` and act on it.
    pub fn dispatch(
        &mut self,
        channel: Channel,
        payload: NativeDictionary<'_>,
    ) -> Result<(), BridgeError> {
        let payload = EventPayload::new(payload);
        match channel {
            Channel::Event => match payload.status_event()? {
                Some(event) => self.handle_status(event),
                None => Ok(()),
            },
            Channel::Open => self.handle_open(&payload.open_request()?),
        }
    }

    pub fn handle_status(&mut self, event: StatusEvent) -> Result<(), BridgeError> {
        if let Some(string) = &event.string {
            debug!(project = %event.project, string = %string, "status text");
        }

        let host = &*self.host;
        let manager = self
            .registry
            .resolve(host, &event.project, &self.panel)
            .ok_or_else(|| {
                BridgeError::Unresolved(format!("no window for project {}", event.project))
            })?;

        match &event.kind {
            StatusKind::Start => manager.handle_start(host),
            StatusKind::Issue(issue) => manager.handle_issue(host, &issue.panel_line()),
            StatusKind::Stop => manager.handle_stop(host),
        }
        Ok(())
    }

    pub fn handle_open(&self, request: &OpenRequest) -> Result<(), BridgeError> {
        let host = &*self.host;
        let window = open::resolve_target_window(host, request).ok_or_else(|| {
            BridgeError::Unresolved(format!("no window for {}", request.full_path()))
        })?;
        host.open_file_at(window, &request.encoded_position());
        Ok(())
    }
}

impl<H: EditorHost> NotificationSink for Dispatcher<H> {
    fn on_notification(&mut self, channel: Channel, payload: NativeDictionary<'_>) {
        match self.dispatch(channel, payload) {
            Ok(()) => {}
            Err(BridgeError::Malformed(e)) => warn!(%channel, "dropping malformed payload: {e}"),
            Err(e @ BridgeError::Unresolved(_)) => debug!(%channel, "dropping event: {e}"),
        }
    }
}
