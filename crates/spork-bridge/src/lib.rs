//! Editor-side half of the spork bridge.
//!
//! Build notifications arrive on two distributed notification channels.
//! Status events drive a per-project issue panel; open requests jump an
//! editor window to a file and line. The host supplies windows, panels,
//! and a timer through [`EditorHost`]; [`Bridge::start`] wires everything
//! together.
//!
//! ```rust,ignore
//! let bridge = Bridge::from_settings(host, spork_platform::create_center(), Some(user_dir))?;
//! ```

pub mod bridge;
pub mod dispatch;
pub mod host;
pub mod logging;
pub mod manager;
pub mod open;
pub mod payload;
pub mod registry;

#[cfg(test)]
mod testing;

pub use bridge::Bridge;
pub use dispatch::Dispatcher;
pub use host::{EditorHost, PanelCommand, WindowCommand};
pub use manager::ProjectIssueManager;
pub use payload::EventPayload;
pub use registry::ProjectRegistry;
