//! Notification center port.
//!
//! A [`NotificationCenter`] registers observers for named channels and pumps
//! the runtime so queued notifications reach them. Deliveries enter the
//! process through [`Observer::deliver`], which filters and routes them to
//! the [`NotificationSink`] the bridge supplies.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spork_common::{Channel, PlatformError};
use spork_config::ChannelConfig;
use tracing::{debug, warn};

use crate::native::{NativeDictionary, NativeStr, NativeString};

#[cfg(target_os = "macos")]
pub mod distributed;
pub mod local;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Inbound port: receives every accepted notification.
pub trait NotificationSink {
    fn on_notification(&mut self, channel: Channel, payload: NativeDictionary<'_>);
}

/// Platform-agnostic notification center.
pub trait NotificationCenter {
    /// Register `observer` for notifications named `name`, delivered
    /// immediately and without coalescing.
    fn add_observer(&self, observer: &Rc<Observer>, name: &NativeString) -> Result<()>;

    fn remove_observer(&self, observer: &Rc<Observer>, name: &NativeString);

    /// Post a notification; `None` posts without a payload.
    fn post(&self, name: &str, payload: Option<&[(&str, String)]>) -> Result<()>;

    /// Run the delivery loop for a zero-length slice. Queued notifications
    /// are delivered synchronously; never waits for new ones.
    fn run_once(&self);
}

/// The registered callback target shared between a subscription and the
/// center it is attached to.
pub struct Observer {
    channels: ChannelConfig,
    sink: RefCell<Box<dyn NotificationSink>>,
    active: Cell<bool>,
}

impl Observer {
    pub fn new(channels: ChannelConfig, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            channels,
            sink: RefCell::new(sink),
            active: Cell::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn deactivate(&self) {
        self.active.set(false);
    }

    /// Route one delivered notification to the sink.
    ///
    /// A missing payload, an undecodable name, or an unknown channel is
    /// ignored. Nothing is delivered once the observer is deactivated.
    pub fn deliver(&self, name: NativeStr<'_>, payload: Option<NativeDictionary<'_>>) {
        if !self.active.get() {
            return;
        }
        let Some(payload) = payload else {
            debug!("notification without payload ignored");
            return;
        };
        let name = match name.decode() {
            Ok(name) => name,
            Err(e) => {
                warn!("undecodable notification name: {e}");
                return;
            }
        };
        let Some(channel) = self.channels.channel_for(&name) else {
            debug!(%name, "notification on unknown channel ignored");
            return;
        };

        match self.sink.try_borrow_mut() {
            Ok(mut sink) => sink.on_notification(channel, payload),
            Err(_) => warn!(%channel, "re-entrant notification dropped"),
        }
    }
}

/// Create the platform-appropriate notification center.
///
/// On macOS: the distributed notification center.
/// On other platforms: an in-process center.
pub fn create_center() -> Rc<dyn NotificationCenter> {
    #[cfg(target_os = "macos")]
    {
        match distributed::DistributedCenter::new() {
            Ok(center) => return Rc::new(center),
            Err(e) => warn!("distributed center unavailable, using local center: {e}"),
        }
    }
    Rc::new(local::LocalCenter::new())
}
