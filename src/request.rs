//! Resolved target and the fixed outbound request.

use std::net::SocketAddr;

use bytes::{Bytes, BytesMut};

/// Resolved upstream target.
///
/// The connector consumes an already-resolved `(host, address)` pair; name
/// resolution happens outside this crate.
#[derive(Debug, Clone)]
pub struct Target {
    host: Box<str>,
    addr: SocketAddr,
}

/// Error constructing a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    /// The resolved host name is empty.
    EmptyHost,
}

impl std::error::Error for TargetError {}

impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::EmptyHost => f.write_str("empty target host"),
        }
    }
}

impl Target {
    /// Target from a resolved host name and socket address.
    pub fn new(host: impl Into<Box<str>>, addr: SocketAddr) -> Result<Self, TargetError> {
        let host = host.into();
        if host.is_empty() {
            return Err(TargetError::EmptyHost);
        }
        Ok(Self { host, addr })
    }

    /// The host name, used as the outbound `Host` value.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The resolved socket address.
    #[inline]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Build the fixed outbound request for one exchange.
///
/// One request line and header block with the `Host` taken from the target
/// and `Connection: close`: outbound connections are never reused. Mutates no
/// shared state, so independent exchanges may build concurrently.
pub fn build(target: &Target) -> Bytes {
    let host = target.host().as_bytes();

    let mut buf = BytesMut::with_capacity(48 + host.len());
    buf.extend_from_slice(b"GET / HTTP/1.1\r\nHost: ");
    buf.extend_from_slice(host);
    buf.extend_from_slice(b"\r\nConnection: close\r\n\r\n");
    buf.freeze()
}
