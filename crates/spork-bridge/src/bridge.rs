//! Wiring of dispatcher, subscription and poll driver onto a host.

use std::path::Path;
use std::rc::Rc;

use spork_config::{validation, SporkConfig};
use spork_platform::{HostTimer, NotificationCenter, PollDriver, Subscription};
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::host::EditorHost;
use crate::logging;

/// A running bridge. Dropping it or calling [`shutdown`](Self::shutdown)
/// unsubscribes; the poll timer then stops re-arming on its next tick.
pub struct Bridge {
    subscription: Subscription,
}

impl Bridge {
    /// Plug-in entry point: load `spork.toml` from the host's settings
    /// directory (seeding it on first run), install logging, and start.
    pub fn from_settings<H: EditorHost + 'static>(
        host: Rc<H>,
        center: Rc<dyn NotificationCenter>,
        settings_dir: Option<&Path>,
    ) -> spork_common::Result<Self> {
        let config = spork_config::load_settings(settings_dir)?;
        logging::init(&config.logging);
        Self::start(host, center, &config)
    }

    /// Subscribe with `config` and arm the poll timer on `host`.
    ///
    /// The config is validated first; a bridge never listens on
    /// indistinct channels or polls outside the configured range.
    pub fn start<H: EditorHost + 'static>(
        host: Rc<H>,
        center: Rc<dyn NotificationCenter>,
        config: &SporkConfig,
    ) -> spork_common::Result<Self> {
        validation::validate(config)?;

        let dispatcher = Dispatcher::new(host.clone(), config.panel.clone());
        let subscription = Subscription::new(center, &config.channels, Box::new(dispatcher))?;

        let timer: Rc<dyn HostTimer> = host;
        PollDriver::new(&subscription, &config.poll).start(timer);

        info!(interval_ms = config.poll.interval_ms, "spork bridge started");
        Ok(Self { subscription })
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn shutdown(&mut self) {
        self.subscription.teardown();
    }
}
