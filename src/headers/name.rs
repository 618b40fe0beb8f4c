use bytes::Bytes;

use crate::matches;

/// HTTP header name.
///
/// Keeps the casing the origin sent for the forwarded representation, plus a
/// lowercase copy for matching: header-name comparison is case-insensitive.
/// When the origin name is already lowercase, both representations share one
/// allocation.
#[derive(Clone)]
pub struct HeaderName {
    raw: Bytes,
    lower: Bytes,
}

impl HeaderName {
    /// Wrap a name the parser produced.
    ///
    /// `raw` must be a nonempty token, as validated by
    /// [`parse_header_chunk`][crate::parser::parse_header_chunk].
    pub(crate) fn from_parsed(raw: Bytes) -> Self {
        debug_assert!(!raw.is_empty() && raw.iter().all(|&b| matches::is_token(b)));

        let lower = if raw.iter().any(u8::is_ascii_uppercase) {
            Bytes::from(raw.to_ascii_lowercase())
        } else {
            raw.clone()
        };
        Self { raw, lower }
    }

    /// Name from a static string, which must be lowercase.
    ///
    /// # Panics
    ///
    /// Panics if the input is empty, is not a valid token, or contains
    /// uppercase characters.
    pub fn from_static(name: &'static str) -> Self {
        let raw = name.as_bytes();
        assert!(
            !raw.is_empty() && raw.iter().all(|&b| matches::is_token(b) && !b.is_ascii_uppercase()),
            "static header name must be a lowercase token"
        );
        Self {
            raw: Bytes::from_static(raw),
            lower: Bytes::from_static(raw),
        }
    }

    /// Name with a precomputed static lowercase form, for synthesized
    /// headers whose forwarded casing is not lowercase.
    pub(crate) fn from_static_parts(raw: &'static str, lower: &'static str) -> Self {
        debug_assert!(raw.eq_ignore_ascii_case(lower));
        Self {
            raw: Bytes::from_static(raw.as_bytes()),
            lower: Bytes::from_static(lower.as_bytes()),
        }
    }

    /// The name as the origin sent it.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: names are validated tokens, hence ASCII
        unsafe { str::from_utf8_unchecked(&self.raw) }
    }

    /// The name as the origin sent it, as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The lowercase form used for matching.
    #[inline]
    pub fn lowercase(&self) -> &str {
        // SAFETY: names are validated tokens, hence ASCII
        unsafe { str::from_utf8_unchecked(&self.lower) }
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower
    }
}

impl Eq for HeaderName {}

impl PartialEq<str> for HeaderName {
    /// Match against a lowercase name.
    fn eq(&self, other: &str) -> bool {
        self.lowercase() == other
    }
}

impl std::fmt::Display for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}
