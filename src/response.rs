//! Finalized response head for the body-forwarding layer.

use bytes::{Bytes, BytesMut};

use crate::headers::HeaderList;
use crate::http::{StatusCode, Version};

/// Finalized response head: status plus the admitted header sequence.
///
/// Produced by [`Exchange`][crate::proto::Exchange] once the origin's header
/// block completes (or the degraded HTTP/0.9 path is taken); consumed by the
/// body-forwarding layer together with the remaining connection bytes.
#[derive(Debug)]
pub struct ResponseHead {
    /// What the origin spoke. Informational: the downstream line is always
    /// written as `HTTP/1.1`, see [`encode`][ResponseHead::encode].
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase as received; empty on the degraded HTTP/0.9 path.
    pub reason: Bytes,
    /// Admitted headers in arrival order, synthesized entries appended last.
    pub headers: HeaderList,
}

impl ResponseHead {
    pub(crate) fn new() -> Self {
        Self {
            version: Version::HTTP_09,
            status: StatusCode::OK,
            reason: Bytes::new(),
            headers: HeaderList::new(),
        }
    }

    /// Encode the downstream head bytes.
    ///
    /// The status line is written as `HTTP/1.1` regardless of the origin's
    /// version (the proxy speaks its own version downstream), carrying the
    /// origin's code and reason; the reason is omitted when empty.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(64 + self.reason.len());

        buf.extend_from_slice(b"HTTP/1.1 ");
        buf.extend_from_slice(itoa::Buffer::new().format(self.status.code()).as_bytes());
        if !self.reason.is_empty() {
            buf.extend_from_slice(b" ");
            buf.extend_from_slice(&self.reason);
        }
        buf.extend_from_slice(b"\r\n");

        for entry in &self.headers {
            buf.extend_from_slice(entry.name().as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(entry.value().as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(b"\r\n");
        buf.freeze()
    }
}
