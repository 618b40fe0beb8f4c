use std::io;

use crate::parser::ParseError;

/// Fatal exchange error.
///
/// [`Feed::NeedMoreData`] is a resumption signal, not an error, and a
/// malformed status line is not represented here either: it degrades to an
/// HTTP/0.9-style response instead of failing. Everything below retires the
/// exchange; retry policy, if any, belongs to a higher layer.
///
/// [`Feed::NeedMoreData`]: crate::proto::Feed::NeedMoreData
#[derive(Debug)]
pub enum ExchangeError {
    /// Origin sent a header line that cannot be safely forwarded.
    InvalidHeader(ParseError),
    /// Buffered head grew past the configured limit without completing.
    HeadTooLarge,
    /// Connect, read, write, or timeout failure from the transport.
    Transport(io::Error),
    /// Exchange cancelled: client went away, the target never resolved, or
    /// the coordinator was driven out of order.
    Aborted,
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHeader(err) => Some(err),
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidHeader(err) => write!(f, "upstream sent invalid header: {err}"),
            Self::HeadTooLarge => f.write_str("upstream response head too large"),
            Self::Transport(err) => write!(f, "upstream transport: {err}"),
            Self::Aborted => f.write_str("exchange aborted"),
        }
    }
}

impl From<io::Error> for ExchangeError {
    #[inline]
    fn from(err: io::Error) -> Self {
        Self::Transport(err)
    }
}
