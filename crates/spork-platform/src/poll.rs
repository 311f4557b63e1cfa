//! Cooperative pump of the notification runtime driven by a host timer.

use std::rc::{Rc, Weak};
use std::time::Duration;

use spork_config::PollConfig;
use tracing::debug;

use crate::center::{NotificationCenter, Observer};
use crate::subscription::Subscription;

/// One-shot timer primitive owned by the host's scheduling loop.
pub trait HostTimer {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The runtime was pumped; schedule the next tick after this delay.
    Rearm(Duration),
    /// The subscription is gone; do not schedule again.
    Stopped,
}

/// Pumps the center for a zero-length slice on each tick for as long as
/// its subscription is alive.
pub struct PollDriver {
    center: Rc<dyn NotificationCenter>,
    observer: Weak<Observer>,
    interval: Duration,
}

impl PollDriver {
    pub fn new(subscription: &Subscription, poll: &PollConfig) -> Self {
        Self {
            center: subscription.center().clone(),
            observer: subscription.observer(),
            interval: poll.interval(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_live(&self) -> bool {
        self.observer
            .upgrade()
            .is_some_and(|observer| observer.is_active())
    }

    pub fn tick(&self) -> Tick {
        if !self.is_live() {
            return Tick::Stopped;
        }
        self.center.run_once();
        Tick::Rearm(self.interval)
    }

    /// Arm the first tick on `timer`; each tick re-arms itself until the
    /// subscription is torn down.
    pub fn start(self, timer: Rc<dyn HostTimer>) {
        schedule(Rc::new(self), timer);
    }
}

fn schedule(driver: Rc<PollDriver>, timer: Rc<dyn HostTimer>) {
    let interval = driver.interval;
    let next_timer = timer.clone();
    timer.set_timeout(
        interval,
        Box::new(move || match driver.tick() {
            Tick::Rearm(_) => schedule(driver, next_timer),
            Tick::Stopped => debug!("poll driver stopped"),
        }),
    );
}
