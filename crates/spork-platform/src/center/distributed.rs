//! macOS distributed notification center backed by CoreFoundation.
//!
//! The observer pointer handed to CoreFoundation is the address of the
//! shared [`Observer`]; the subscription keeps that `Rc` alive until both
//! registrations are removed.

use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::rc::Rc;
use std::time::Duration;

use core_foundation::base::{Boolean, CFIndex};
use core_foundation::dictionary::CFDictionaryRef;
use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};
use core_foundation::string::CFStringRef;
use spork_common::PlatformError;
use tracing::{debug, error};

use super::{NotificationCenter, Observer, Result};
use crate::native::{NativeDictionary, NativeStr, NativeString, OwnedDictionary};

type CFNotificationCenterRef = *mut c_void;

type CFNotificationCallback = extern "C" fn(
    center: CFNotificationCenterRef,
    observer: *mut c_void,
    name: CFStringRef,
    object: *const c_void,
    user_info: CFDictionaryRef,
);

/// `CFNotificationSuspensionBehaviorDeliverImmediately`
const DELIVER_IMMEDIATELY: CFIndex = 4;

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFNotificationCenterGetDistributedCenter() -> CFNotificationCenterRef;

    fn CFNotificationCenterAddObserver(
        center: CFNotificationCenterRef,
        observer: *const c_void,
        call_back: CFNotificationCallback,
        name: CFStringRef,
        object: *const c_void,
        suspension_behavior: CFIndex,
    );

    fn CFNotificationCenterRemoveObserver(
        center: CFNotificationCenterRef,
        observer: *const c_void,
        name: CFStringRef,
        object: *const c_void,
    );

    fn CFNotificationCenterPostNotification(
        center: CFNotificationCenterRef,
        name: CFStringRef,
        object: *const c_void,
        user_info: CFDictionaryRef,
        deliver_immediately: Boolean,
    );
}

pub struct DistributedCenter {
    center: CFNotificationCenterRef,
}

impl DistributedCenter {
    pub fn new() -> Result<Self> {
        // SAFETY: returns the process-wide singleton; never released.
        let center = unsafe { CFNotificationCenterGetDistributedCenter() };
        if center.is_null() {
            return Err(PlatformError::NotSupported(
                "distributed notification center".into(),
            ));
        }
        Ok(Self { center })
    }
}

extern "C" fn handle_distributed_notification(
    _center: CFNotificationCenterRef,
    observer: *mut c_void,
    name: CFStringRef,
    _object: *const c_void,
    user_info: CFDictionaryRef,
) {
    if observer.is_null() || name.is_null() {
        return;
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: `observer` is the `Rc<Observer>` address registered in
        // `add_observer`, kept alive until `remove_observer`. `name` and
        // `user_info` are owned by CoreFoundation for this call.
        let observer = unsafe { &*(observer as *const Observer) };
        let name = unsafe { NativeStr::from_concrete(name) };
        let payload = if user_info.is_null() {
            None
        } else {
            Some(unsafe { NativeDictionary::from_concrete(user_info) })
        };
        observer.deliver(name, payload);
    }));

    if result.is_err() {
        error!("panic while handling distributed notification");
    }
}

impl NotificationCenter for DistributedCenter {
    fn add_observer(&self, observer: &Rc<Observer>, name: &NativeString) -> Result<()> {
        // SAFETY: see `handle_distributed_notification`.
        unsafe {
            CFNotificationCenterAddObserver(
                self.center,
                Rc::as_ptr(observer) as *const c_void,
                handle_distributed_notification,
                name.as_concrete(),
                ptr::null(),
                DELIVER_IMMEDIATELY,
            );
        }
        debug!(name = ?name, "distributed observer added");
        Ok(())
    }

    fn remove_observer(&self, observer: &Rc<Observer>, name: &NativeString) {
        // SAFETY: same observer address and name as the matching add.
        unsafe {
            CFNotificationCenterRemoveObserver(
                self.center,
                Rc::as_ptr(observer) as *const c_void,
                name.as_concrete(),
                ptr::null(),
            );
        }
    }

    fn post(&self, name: &str, payload: Option<&[(&str, String)]>) -> Result<()> {
        let name = NativeString::encode(name)?;
        let payload = payload
            .map(|pairs| OwnedDictionary::from_pairs(pairs.iter().map(|(k, v)| (k, v))))
            .transpose()?;
        let user_info = payload
            .as_ref()
            .map_or(ptr::null(), OwnedDictionary::as_concrete);

        // SAFETY: `name` and `payload` outlive the call; CF copies what it
        // forwards to the daemon.
        unsafe {
            CFNotificationCenterPostNotification(
                self.center,
                name.as_concrete(),
                ptr::null(),
                user_info,
                1,
            );
        }
        Ok(())
    }

    fn run_once(&self) {
        // SAFETY: reading the CF-owned mode constant.
        let mode = unsafe { kCFRunLoopDefaultMode };
        CFRunLoop::run_in_mode(mode, Duration::ZERO, false);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use spork_common::Channel;
    use spork_config::ChannelConfig;

    use super::*;
    use crate::center::tests::RecordingSink;
    use crate::Subscription;

    fn unique_channels() -> ChannelConfig {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let tag = format!("{}.{nanos}", std::process::id());
        ChannelConfig {
            event: format!("net.musictheory.spork.test.{tag}.event"),
            open: format!("net.musictheory.spork.test.{tag}.open"),
        }
    }

    fn pump_until(center: &DistributedCenter, timeout: Duration, done: impl Fn() -> bool) {
        let deadline = Instant::now() + timeout;
        while !done() && Instant::now() < deadline {
            center.run_once();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn round_trip_through_distributed_center() {
        let center = Rc::new(DistributedCenter::new().unwrap());
        let channels = unique_channels();
        let sink = RecordingSink::default();
        let mut subscription =
            Subscription::new(center.clone(), &channels, Box::new(sink.clone())).unwrap();

        let payload = [("project", "/Users/me/proj".to_string())];
        center.post(&channels.event, Some(&payload[..])).unwrap();
        center.post(&channels.open, Some(&payload[..])).unwrap();
        pump_until(&center, Duration::from_secs(5), || {
            sink.received.borrow().len() >= 2
        });

        {
            let received = sink.received.borrow();
            assert_eq!(received.len(), 2);
            assert!(received.contains(&(Channel::Event, Some("/Users/me/proj".to_string()))));
            assert!(received.contains(&(Channel::Open, Some("/Users/me/proj".to_string()))));
        }

        subscription.teardown();
        center.post(&channels.event, Some(&payload[..])).unwrap();
        pump_until(&center, Duration::from_millis(500), || false);
        assert_eq!(sink.received.borrow().len(), 2);
    }
}
