use super::{HeaderName, HeaderValue};

/// One forwarded header.
#[derive(Clone, Debug)]
pub struct HeaderEntry {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderEntry {
    /// Returns reference to the header name.
    #[inline]
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns reference to the header value.
    #[inline]
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

/// Insertion-ordered header sequence.
///
/// Later same-named headers never overwrite earlier ones; duplicates are all
/// retained in arrival order, the way the origin sent them. Lookups match on
/// the lowercase name.
#[derive(Clone, Debug, Default)]
pub struct HeaderList {
    entries: Vec<HeaderEntry>,
}

impl HeaderList {
    /// Create new empty [`HeaderList`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a header, keeping any earlier same-named entries.
    #[inline]
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push(HeaderEntry { name, value });
    }

    /// First value whose lowercase name equals `lower`.
    pub fn get(&self, lower: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|entry| entry.name.lowercase() == lower)
            .map(HeaderEntry::value)
    }

    /// All values whose lowercase name equals `lower`, in arrival order.
    pub fn get_all<'a>(&'a self, lower: &'a str) -> impl Iterator<Item = &'a HeaderValue> {
        self.entries
            .iter()
            .filter(move |entry| entry.name.lowercase() == lower)
            .map(HeaderEntry::value)
    }

    /// Returns `true` if any entry has the given lowercase name.
    pub fn contains(&self, lower: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name.lowercase() == lower)
    }

    /// Iterate entries in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry> {
        self.entries.iter()
    }

    /// Returns headers length.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if headers has no element.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a HeaderEntry;
    type IntoIter = std::slice::Iter<'a, HeaderEntry>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
