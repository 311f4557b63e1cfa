//! CoreFoundation backend.
//!
//! Owned handles wrap `core_foundation` types, whose `Drop` is the single
//! `CFRelease`. Borrowed views stay raw refs tied to a lifetime, since the
//! runtime hands them out under the get rule.

use std::ffi::c_void;
use std::marker::PhantomData;

use core_foundation::base::{
    kCFAllocatorDefault, CFGetTypeID, CFIndexConvertible, CFRange, TCFType,
};
use core_foundation::dictionary::{CFDictionary, CFDictionaryGetValue, CFDictionaryRef};
use core_foundation::string::{
    CFString, CFStringCreateWithBytes, CFStringEncoding, CFStringGetCharacters,
    CFStringGetLength, CFStringRef,
};
use spork_common::NativeError;

/// `kCFStringEncodingUTF16LE`; bytes carry no BOM.
const UTF16_LE: CFStringEncoding = 0x1400_0100;

pub(crate) struct RawString(CFString);

impl RawString {
    pub(crate) fn create(units: &[u16]) -> Result<Self, NativeError> {
        let bytes: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
        // SAFETY: `bytes` outlives the call; CF copies the buffer.
        let raw = unsafe {
            CFStringCreateWithBytes(
                kCFAllocatorDefault,
                bytes.as_ptr(),
                bytes.len().to_CFIndex(),
                UTF16_LE,
                0,
            )
        };
        if raw.is_null() {
            return Err(NativeError::Allocation(format!(
                "CFStringCreateWithBytes returned null for {} code units",
                units.len()
            )));
        }
        // SAFETY: non-null and returned under the create rule; the wrapper
        // takes over the one reference.
        Ok(Self(unsafe { CFString::wrap_under_create_rule(raw) }))
    }

    pub(crate) fn as_raw_str(&self) -> RawStr<'_> {
        RawStr {
            raw: self.0.as_concrete_TypeRef(),
            _marker: PhantomData,
        }
    }

    pub(crate) fn as_concrete(&self) -> CFStringRef {
        self.0.as_concrete_TypeRef()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct RawStr<'a> {
    raw: CFStringRef,
    _marker: PhantomData<&'a ()>,
}

impl RawStr<'_> {
    /// # Safety
    ///
    /// `raw` must be a non-null CFString that stays alive for the returned
    /// lifetime.
    pub(crate) unsafe fn from_concrete(raw: CFStringRef) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub(crate) fn len(self) -> usize {
        // SAFETY: `raw` is a live CFString for `'a`.
        let len = unsafe { CFStringGetLength(self.raw) };
        usize::try_from(len).unwrap_or(0)
    }

    pub(crate) fn copy_units(self, buf: &mut [u16]) {
        let range = CFRange::init(0, buf.len().to_CFIndex());
        // SAFETY: `buf` holds exactly `range.length` code units.
        unsafe { CFStringGetCharacters(self.raw, range, buf.as_mut_ptr()) }
    }
}

pub(crate) struct RawDict(CFDictionary<CFString, CFString>);

impl RawDict {
    pub(crate) fn create(entries: Vec<(RawString, RawString)>) -> Result<Self, NativeError> {
        let pairs: Vec<(CFString, CFString)> =
            entries.into_iter().map(|(k, v)| (k.0, v.0)).collect();
        // The dictionary retains its keys and values; `pairs` drops our
        // references on return.
        Ok(Self(CFDictionary::from_CFType_pairs(&pairs)))
    }

    pub(crate) fn as_raw_dict(&self) -> RawDictRef<'_> {
        RawDictRef {
            raw: self.0.as_concrete_TypeRef(),
            _marker: PhantomData,
        }
    }

    pub(crate) fn as_concrete(&self) -> CFDictionaryRef {
        self.0.as_concrete_TypeRef()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct RawDictRef<'a> {
    raw: CFDictionaryRef,
    _marker: PhantomData<&'a ()>,
}

impl<'a> RawDictRef<'a> {
    /// # Safety
    ///
    /// `raw` must be a non-null CFDictionary alive for the returned lifetime.
    pub(crate) unsafe fn from_concrete(raw: CFDictionaryRef) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub(crate) fn get(self, key: RawStr<'_>) -> Option<RawStr<'a>> {
        // SAFETY: both references are live for the duration of the call.
        let value = unsafe { CFDictionaryGetValue(self.raw, key.raw as *const c_void) };
        if value.is_null() {
            return None;
        }
        // Posters may put non-string values in the payload.
        // SAFETY: `value` is a non-null CF object owned by the dictionary.
        if unsafe { CFGetTypeID(value) } != CFString::type_id() {
            return None;
        }
        Some(RawStr {
            raw: value as CFStringRef,
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use core_foundation::number::CFNumber;

    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn created_string_matches_cfstring() {
        let raw = RawString::create(&units("net.musictheory.spork.open")).unwrap();
        assert_eq!(raw.0, CFString::new("net.musictheory.spork.open"));
        assert_eq!(raw.as_raw_str().len(), 26);
    }

    #[test]
    fn dictionary_retains_entries() {
        let key = RawString::create(&units("project")).unwrap();
        let value = RawString::create(&units("/Users/me/proj")).unwrap();
        let dict = RawDict::create(vec![(key, value)]).unwrap();

        let lookup = RawString::create(&units("project")).unwrap();
        let found = dict.as_raw_dict().get(lookup.as_raw_str()).unwrap();
        let mut buf = vec![0u16; found.len()];
        found.copy_units(&mut buf);
        assert_eq!(String::from_utf16(&buf).unwrap(), "/Users/me/proj");
    }

    #[test]
    fn non_string_value_is_absent() {
        let key = CFString::new("line");
        let value = CFNumber::from(12i32);
        let dict = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);

        // SAFETY: `dict` outlives the view.
        let view = unsafe { RawDictRef::from_concrete(dict.as_concrete_TypeRef()) };
        let lookup = RawString::create(&units("line")).unwrap();
        assert!(view.get(lookup.as_raw_str()).is_none());
    }
}
