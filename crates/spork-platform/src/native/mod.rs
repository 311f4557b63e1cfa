//! Owned and borrowed handles over the OS runtime's string and dictionary
//! objects.
//!
//! Creation returns an owned handle whose `Drop` performs the single
//! matching release, so every exit path (including `?` early returns)
//! releases exactly once. Values handed out by the runtime under its "get"
//! rule (dictionary values, callback arguments) are borrowed views that are
//! never released.
//!
//! On macOS the backend is CoreFoundation. Elsewhere an in-process backend
//! stores UTF-16 code units on the heap and counts live handles per thread.

mod dictionary;
mod string;

#[cfg(target_os = "macos")]
mod cf;
#[cfg(target_os = "macos")]
use cf as backend;

#[cfg(not(target_os = "macos"))]
mod portable;
#[cfg(not(target_os = "macos"))]
use portable as backend;

pub use dictionary::{NativeDictionary, OwnedDictionary};
pub use string::{NativeStr, NativeString};

#[cfg(not(target_os = "macos"))]
pub use portable::live_handles;
