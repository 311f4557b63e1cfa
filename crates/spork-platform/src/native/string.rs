use spork_common::NativeError;

use super::backend;

/// An owned native string. Dropping it releases the runtime object.
pub struct NativeString {
    raw: backend::RawString,
}

impl NativeString {
    /// Create a native string holding the UTF-16 form of `text`.
    pub fn encode(text: &str) -> Result<Self, NativeError> {
        let units: Vec<u16> = text.encode_utf16().collect();
        Ok(Self {
            raw: backend::RawString::create(&units)?,
        })
    }

    pub fn as_native_str(&self) -> NativeStr<'_> {
        NativeStr {
            raw: self.raw.as_raw_str(),
        }
    }

    pub fn decode(&self) -> Result<String, NativeError> {
        self.as_native_str().decode()
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.as_native_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(target_os = "macos")]
    pub(crate) fn as_concrete(&self) -> core_foundation::string::CFStringRef {
        self.raw.as_concrete()
    }

    pub(crate) fn into_raw(self) -> backend::RawString {
        self.raw
    }
}

impl std::fmt::Debug for NativeString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NativeString").field(&self.decode()).finish()
    }
}

/// A borrowed native string, valid for `'a` and never released by us.
#[derive(Clone, Copy)]
pub struct NativeStr<'a> {
    pub(super) raw: backend::RawStr<'a>,
}

impl NativeStr<'_> {
    /// # Safety
    ///
    /// `raw` must be a non-null CFString alive for the returned lifetime.
    #[cfg(target_os = "macos")]
    pub(crate) unsafe fn from_concrete(raw: core_foundation::string::CFStringRef) -> Self {
        Self {
            raw: backend::RawStr::from_concrete(raw),
        }
    }

    pub fn len(self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Copy out every code unit and convert to a Rust string.
    ///
    /// Never reads past the reported length. Unpaired surrogates are an
    /// error rather than being replaced.
    pub fn decode(self) -> Result<String, NativeError> {
        let len = self.raw.len();
        let mut units = vec![0u16; len];
        if len > 0 {
            self.raw.copy_units(&mut units);
        }
        String::from_utf16(&units).map_err(|e| NativeError::InvalidUtf16(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        NativeString::encode(text).unwrap().decode().unwrap()
    }

    #[test]
    fn round_trip_ascii() {
        assert_eq!(round_trip("net.musictheory.spork.event"), "net.musictheory.spork.event");
    }

    #[test]
    fn round_trip_empty() {
        let ns = NativeString::encode("").unwrap();
        assert!(ns.is_empty());
        assert_eq!(ns.decode().unwrap(), "");
    }

    #[test]
    fn round_trip_multibyte() {
        for text in ["héllo wörld", "日本語のパス/ファイル.js", "emoji 🎵🎶 line", "\u{10FFFF}"] {
            assert_eq!(round_trip(text), text);
        }
    }

    #[test]
    fn length_counts_code_units() {
        assert_eq!(NativeString::encode("abc").unwrap().len(), 3);
        // Astral code points take a surrogate pair.
        assert_eq!(NativeString::encode("🎵").unwrap().len(), 2);
    }

    #[test]
    fn borrowed_view_decodes_same_text() {
        let ns = NativeString::encode("/Users/me/project").unwrap();
        let view = ns.as_native_str();
        assert_eq!(view.len(), ns.len());
        assert_eq!(view.decode().unwrap(), "/Users/me/project");
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn drop_releases_exactly_once() {
        let before = super::super::live_handles();
        let a = NativeString::encode("a").unwrap();
        let b = NativeString::encode("b").unwrap();
        assert_eq!(super::super::live_handles(), before + 2);
        drop(a);
        assert_eq!(super::super::live_handles(), before + 1);
        drop(b);
        assert_eq!(super::super::live_handles(), before);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn optional_none_releases_nothing() {
        let before = super::super::live_handles();
        let missing: Option<NativeString> = None;
        drop(missing);
        assert_eq!(super::super::live_handles(), before);
    }
}
