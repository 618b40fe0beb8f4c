//! Upstream connector knobs.

use std::time::Duration;

/// Upstream connector configuration.
///
/// Directive parsing lives outside this crate; these are the values the
/// transport and coordinator consume, with the stock defaults.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Limit for establishing the outbound connection.
    pub connect_timeout: Duration,
    /// Limit for writing the request.
    pub send_timeout: Duration,
    /// Limit for each read while the response head is incomplete.
    pub read_timeout: Duration,
    /// Unparsed head bytes buffered before the exchange fails with
    /// [`HeadTooLarge`][crate::ExchangeError::HeadTooLarge]; keeps an origin
    /// that never terminates a line from buffering forever.
    pub max_head_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(60),
            send_timeout: Duration::from_secs(60),
            read_timeout: Duration::from_secs(60),
            max_head_bytes: 64 * 1024,
        }
    }
}
