use spork_common::NativeError;

use super::backend;
use super::string::{NativeStr, NativeString};

/// Borrowed view of a string-keyed native dictionary.
///
/// The runtime owns the dictionary; the view must not outlive the callback
/// it was delivered to.
#[derive(Clone, Copy)]
pub struct NativeDictionary<'a> {
    raw: backend::RawDictRef<'a>,
}

impl<'a> NativeDictionary<'a> {
    /// # Safety
    ///
    /// `raw` must be a non-null CFDictionary alive for the returned lifetime.
    #[cfg(target_os = "macos")]
    pub(crate) unsafe fn from_concrete(
        raw: core_foundation::dictionary::CFDictionaryRef,
    ) -> Self {
        Self {
            raw: backend::RawDictRef::from_concrete(raw),
        }
    }

    /// Look up `key` and decode its string value.
    ///
    /// The transient key object is released right after the lookup whether
    /// or not the key was found. An absent key is `NativeError::MissingField`.
    pub fn get_string(&self, key: &str) -> Result<String, NativeError> {
        let key_string = NativeString::encode(key)?;
        let value = self.raw.get(key_string.as_native_str().raw);
        drop(key_string);

        match value {
            Some(raw) => NativeStr { raw }.decode(),
            None => Err(NativeError::MissingField(key.to_string())),
        }
    }

    /// Like [`get_string`](Self::get_string) but an absent key is `Ok(None)`.
    pub fn get_optional(&self, key: &str) -> Result<Option<String>, NativeError> {
        match self.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(NativeError::MissingField(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// A dictionary this process created, e.g. a payload about to be posted.
pub struct OwnedDictionary {
    raw: backend::RawDict,
}

impl OwnedDictionary {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, NativeError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (key, value) in pairs {
            let key = NativeString::encode(key.as_ref())?;
            let value = NativeString::encode(value.as_ref())?;
            entries.push((key.into_raw(), value.into_raw()));
        }
        Ok(Self {
            raw: backend::RawDict::create(entries)?,
        })
    }

    pub fn as_dictionary(&self) -> NativeDictionary<'_> {
        NativeDictionary {
            raw: self.raw.as_raw_dict(),
        }
    }

    #[cfg(target_os = "macos")]
    pub(crate) fn as_concrete(&self) -> core_foundation::dictionary::CFDictionaryRef {
        self.raw.as_concrete()
    }
}
