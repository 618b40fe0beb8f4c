use bytes::Bytes;

use crate::matches;

/// HTTP header value.
///
/// Stored as the origin sent it, minus surrounding whitespace. Values are not
/// required to be UTF-8 ([obs-text] is allowed), so [`as_str`] is fallible.
///
/// [obs-text]: <https://datatracker.ietf.org/doc/html/rfc9110#name-field-values>
/// [`as_str`]: HeaderValue::as_str
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderValue {
    bytes: Bytes,
}

impl HeaderValue {
    /// The empty value.
    pub const fn empty() -> Self {
        Self {
            bytes: Bytes::new(),
        }
    }

    /// Wrap a value the parser produced, already trimmed and validated.
    pub(crate) fn from_parsed(bytes: Bytes) -> Self {
        debug_assert!(bytes.iter().all(|&b| matches::is_value(b)));
        Self { bytes }
    }

    /// Value from static bytes.
    ///
    /// # Panics
    ///
    /// Panics if the input contains a control character.
    pub fn from_static(value: &'static [u8]) -> Self {
        assert!(
            value.iter().all(|&b| matches::is_value(b)),
            "static header value must not contain control characters"
        );
        Self {
            bytes: Bytes::from_static(value),
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns header value as a string slice, if it is UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.bytes).ok()
    }

    /// Returns the value length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the value is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq<[u8]> for HeaderValue {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes.as_ref() == other
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.bytes.as_ref() == other.as_bytes()
    }
}

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.bytes, f)
    }
}
