//! Binding of one observer to both spork channels.

use std::rc::{Rc, Weak};

use spork_common::{Channel, PlatformError};
use spork_config::ChannelConfig;
use tracing::info;

use crate::center::{NotificationCenter, NotificationSink, Observer};
use crate::native::NativeString;

/// Live registration of a sink on the event and open channels.
///
/// The encoded channel names are held for the lifetime of the
/// registration and released after both channels are unregistered.
/// Teardown runs once, either explicitly or on drop.
pub struct Subscription {
    center: Rc<dyn NotificationCenter>,
    observer: Rc<Observer>,
    names: Vec<NativeString>,
}

impl Subscription {
    pub fn new(
        center: Rc<dyn NotificationCenter>,
        channels: &ChannelConfig,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, PlatformError> {
        let observer = Rc::new(Observer::new(channels.clone(), sink));
        let mut subscription = Self {
            center,
            observer,
            names: Vec::with_capacity(Channel::ALL.len()),
        };

        // On error `subscription` drops here, unregistering whatever was
        // already registered.
        for channel in Channel::ALL {
            let name = NativeString::encode(channels.name(channel))?;
            subscription
                .center
                .add_observer(&subscription.observer, &name)?;
            subscription.names.push(name);
        }

        info!(
            event = %channels.event,
            open = %channels.open,
            "subscribed to spork notifications"
        );
        Ok(subscription)
    }

    pub fn is_active(&self) -> bool {
        self.observer.is_active()
    }

    pub fn center(&self) -> &Rc<dyn NotificationCenter> {
        &self.center
    }

    /// Handle used by the poll driver to notice teardown.
    pub fn observer(&self) -> Weak<Observer> {
        Rc::downgrade(&self.observer)
    }

    /// Unregister both channels and release their names. Later calls do
    /// nothing.
    pub fn teardown(&mut self) {
        if !self.observer.is_active() {
            return;
        }
        self.observer.deactivate();
        for name in &self.names {
            self.center.remove_observer(&self.observer, name);
        }
        self.names.clear();
        info!("unsubscribed from spork notifications");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.teardown();
    }
}
