//! OS-facing half of the spork bridge: native string and dictionary
//! handles, the notification center port, the channel subscription, and
//! the cooperative poll driver.

pub mod center;
pub mod native;
pub mod poll;
pub mod subscription;

pub use center::local::LocalCenter;
pub use center::{create_center, NotificationCenter, NotificationSink, Observer};
pub use native::{NativeDictionary, NativeStr, NativeString, OwnedDictionary};
pub use poll::{HostTimer, PollDriver, Tick};
pub use subscription::Subscription;

#[cfg(target_os = "macos")]
pub use center::distributed::DistributedCenter;
