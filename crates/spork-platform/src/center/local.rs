//! In-process notification center.
//!
//! Posts are queued and delivered to matching observers on the next
//! [`run_once`](NotificationCenter::run_once). Every post is delivered; the
//! queue never coalesces.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::{NotificationCenter, Observer, Result};
use crate::native::{NativeString, OwnedDictionary};

struct Registration {
    observer: Weak<Observer>,
    name: String,
}

struct Pending {
    name: String,
    native_name: NativeString,
    payload: Option<OwnedDictionary>,
}

#[derive(Default)]
struct LocalState {
    registrations: Vec<Registration>,
    pending: VecDeque<Pending>,
}

#[derive(Default)]
pub struct LocalCenter {
    state: RefCell<LocalState>,
}

impl LocalCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn observer_count(&self) -> usize {
        self.state
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.observer.strong_count() > 0)
            .count()
    }

    /// Number of posts waiting for the next pump.
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl NotificationCenter for LocalCenter {
    fn add_observer(&self, observer: &Rc<Observer>, name: &NativeString) -> Result<()> {
        let name = name.decode()?;
        debug!(%name, "local observer added");
        self.state.borrow_mut().registrations.push(Registration {
            observer: Rc::downgrade(observer),
            name,
        });
        Ok(())
    }

    fn remove_observer(&self, observer: &Rc<Observer>, name: &NativeString) {
        let Ok(name) = name.decode() else {
            return;
        };
        let target = Rc::downgrade(observer);
        self.state
            .borrow_mut()
            .registrations
            .retain(|r| !(r.name == name && Weak::ptr_eq(&r.observer, &target)));
    }

    fn post(&self, name: &str, payload: Option<&[(&str, String)]>) -> Result<()> {
        let native_name = NativeString::encode(name)?;
        let payload = payload
            .map(|pairs| OwnedDictionary::from_pairs(pairs.iter().map(|(k, v)| (k, v))))
            .transpose()?;
        self.state.borrow_mut().pending.push_back(Pending {
            name: name.to_string(),
            native_name,
            payload,
        });
        Ok(())
    }

    fn run_once(&self) {
        let pending: Vec<Pending> = self.state.borrow_mut().pending.drain(..).collect();

        for post in pending {
            // Collect targets first so observers may post or unregister
            // while being delivered to.
            let targets: Vec<Rc<Observer>> = {
                let mut state = self.state.borrow_mut();
                state.registrations.retain(|r| r.observer.strong_count() > 0);
                state
                    .registrations
                    .iter()
                    .filter(|r| r.name == post.name)
                    .filter_map(|r| r.observer.upgrade())
                    .collect()
            };

            for observer in targets {
                observer.deliver(
                    post.native_name.as_native_str(),
                    post.payload.as_ref().map(OwnedDictionary::as_dictionary),
                );
            }
        }
    }
}
