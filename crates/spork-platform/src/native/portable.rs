//! In-process backend used where no CoreFoundation runtime exists.

use std::cell::Cell;

use spork_common::NativeError;

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// Number of native strings created on this thread and not yet released.
pub fn live_handles() -> usize {
    LIVE.with(Cell::get)
}

pub(crate) struct RawString {
    units: Box<[u16]>,
}

impl RawString {
    pub(crate) fn create(units: &[u16]) -> Result<Self, NativeError> {
        LIVE.with(|live| live.set(live.get() + 1));
        Ok(Self {
            units: units.into(),
        })
    }

    pub(crate) fn as_raw_str(&self) -> RawStr<'_> {
        RawStr {
            units: &self.units,
        }
    }
}

impl Drop for RawString {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

#[derive(Clone, Copy)]
pub(crate) struct RawStr<'a> {
    units: &'a [u16],
}

impl RawStr<'_> {
    pub(crate) fn len(self) -> usize {
        self.units.len()
    }

    pub(crate) fn copy_units(self, buf: &mut [u16]) {
        buf.copy_from_slice(&self.units[..buf.len()]);
    }
}

pub(crate) struct RawDict {
    entries: Vec<(RawString, RawString)>,
}

impl RawDict {
    pub(crate) fn create(entries: Vec<(RawString, RawString)>) -> Result<Self, NativeError> {
        Ok(Self { entries })
    }

    pub(crate) fn as_raw_dict(&self) -> RawDictRef<'_> {
        RawDictRef {
            entries: &self.entries,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct RawDictRef<'a> {
    entries: &'a [(RawString, RawString)],
}

impl<'a> RawDictRef<'a> {
    pub(crate) fn get(self, key: RawStr<'_>) -> Option<RawStr<'a>> {
        self.entries
            .iter()
            .find(|(k, _)| *k.units == *key.units)
            .map(|(_, v)| v.as_raw_str())
    }
}
