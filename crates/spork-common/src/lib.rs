pub mod errors;
pub mod events;
pub mod types;

pub use errors::{BridgeError, ConfigError, NativeError, PlatformError, SporkError};
pub use events::{Issue, OpenRequest, StatusEvent, StatusKind};
pub use types::{Channel, PanelId, WindowId};

pub type Result<T> = std::result::Result<T, SporkError>;
