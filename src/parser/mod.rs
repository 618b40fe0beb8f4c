//! HTTP/1 response head parser.
//!
//! [`parse_status_chunk`] and [`parse_header_chunk`] work on chunked bytes:
//! given whatever the cursor currently holds, each call looks for the next
//! line terminator and consumes exactly one line. If no terminator is
//! buffered yet the parser returns [`ParseResult::Pending`] without touching
//! the cursor, and a later call with more bytes resumes at the same position,
//! so a line split across any number of network reads parses identically to
//! one delivered whole.
//!
//! Both `\r\n` and a bare `\n` terminate a line.


use bytes::Bytes;

use crate::common::ParseResult;
use crate::cursor::ByteCursor;
use crate::http::{StatusCode, Version};
use crate::matches;

macro_rules! ready {
    ($e:expr) => {
        match $e {
            Some(ok) => ok,
            None => return ParseResult::Pending,
        }
    };
}

// ===== Errors =====

/// Response head parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Line is not `HTTP/<major>.<minor> <3-digit-code> [<reason>]`.
    InvalidStatusLine,
    /// Invalid character in header name, or no `:` separator.
    InvalidHeaderName,
    /// Control character in header value.
    InvalidHeaderValue,
    /// Folded continuation line; unsupported.
    FoldedHeader,
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidStatusLine => f.write_str("invalid status line"),
            Self::InvalidHeaderName => f.write_str("invalid header name"),
            Self::InvalidHeaderValue => f.write_str("invalid header value"),
            Self::FoldedHeader => f.write_str("folded header line"),
        }
    }
}

// ===== Status Line =====

/// Parsed response status line.
#[derive(Debug)]
pub struct StatusLine {
    pub version: Version,
    pub code: StatusCode,
    /// Reason phrase, possibly empty. Shares storage with the read buffer.
    pub reason: Bytes,
}

/// Parse the response status line.
///
/// This function performs chunked parsing, see [module level documentation]
/// for more details.
///
/// The line is consumed whether or not it validates: on [`Err`] the caller
/// decides between failing the exchange and degrading to an HTTP/0.9-style
/// response, and in the latter case parsing continues at the next line.
///
/// [module level documentation]: crate::parser
/// [`Err`]: ParseResult::Err
pub fn parse_status_chunk(cursor: &mut ByteCursor) -> ParseResult<StatusLine, ParseError> {
    use ParseResult as Result;

    let line = ready!(split_line(cursor)).freeze();
    let s = &line[..];

    // HTTP/<d>.<d> SP <3 digits>, so 12 bytes minimum
    if s.len() < 12 || !s.starts_with(b"HTTP/") {
        return Result::Err(ParseError::InvalidStatusLine);
    }

    let version = match &s[5..8] {
        &[major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            match Version::from_status_digits(major - b'0', minor - b'0') {
                Some(ok) => ok,
                None => return Result::Err(ParseError::InvalidStatusLine),
            }
        }
        _ => return Result::Err(ParseError::InvalidStatusLine),
    };

    if s[8] != b' ' {
        return Result::Err(ParseError::InvalidStatusLine);
    }

    let code = match &s[9..12] {
        &[a, b, c] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            let code = u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0');
            match StatusCode::from_u16(code) {
                Some(ok) => ok,
                None => return Result::Err(ParseError::InvalidStatusLine),
            }
        }
        _ => return Result::Err(ParseError::InvalidStatusLine),
    };

    let reason = match s.get(12) {
        None => Bytes::new(),
        Some(b' ') => {
            if !s[13..].iter().all(|&b| matches::is_value(b)) {
                return Result::Err(ParseError::InvalidStatusLine);
            }
            line.slice(13..)
        }
        Some(_) => return Result::Err(ParseError::InvalidStatusLine),
    };

    Result::Ok(StatusLine {
        version,
        code,
        reason,
    })
}

// ===== Header Line =====

/// One header line as it came off the wire, value already trimmed.
///
/// Name bytes are a validated token; the lowercase copy for matching is
/// computed by [`HeaderName::from_parsed`][crate::headers::HeaderName].
#[derive(Debug)]
pub struct RawHeader {
    pub name: Bytes,
    pub value: Bytes,
}

/// Parse one header line.
///
/// Returns `ParseResult::Ok(None)` on the blank line terminating the header
/// block, consuming it.
///
/// This function performs chunked parsing, see [module level documentation]
/// for more details.
///
/// Unlike the status line, an invalid line here is fatal to the response, and
/// a folded continuation line is rejected rather than unfolded.
///
/// [module level documentation]: crate::parser
pub fn parse_header_chunk(cursor: &mut ByteCursor) -> ParseResult<Option<RawHeader>, ParseError> {
    use ParseResult as Result;

    let line = ready!(split_line(cursor));

    if line.is_empty() {
        return Result::Ok(None);
    }
    if matches!(line[0], b' ' | b'\t') {
        return Result::Err(ParseError::FoldedHeader);
    }

    let line = line.freeze();
    let s = &line[..];

    let colon = match s.iter().position(|&b| b == b':') {
        Some(0) | None => return Result::Err(ParseError::InvalidHeaderName),
        Some(at) => at,
    };
    if !s[..colon].iter().all(|&b| matches::is_token(b)) {
        return Result::Err(ParseError::InvalidHeaderName);
    }

    let mut start = colon + 1;
    while matches!(s.get(start), Some(&(b' ' | b'\t'))) {
        start += 1;
    }
    let mut end = s.len();
    while end > start && matches!(s[end - 1], b' ' | b'\t') {
        end -= 1;
    }
    if !s[start..end].iter().all(|&b| matches::is_value(b)) {
        return Result::Err(ParseError::InvalidHeaderValue);
    }

    Result::Ok(Some(RawHeader {
        name: line.slice(..colon),
        value: line.slice(start..end),
    }))
}

/// Split one complete line off the cursor, terminator consumed and stripped.
///
/// `None` means no terminator is buffered yet; the cursor is untouched.
fn split_line(cursor: &mut ByteCursor) -> Option<bytes::BytesMut> {
    let lf = cursor.as_slice().iter().position(|&b| b == b'\n')?;
    let mut line = cursor.split_unit(lf + 1);
    line.truncate(lf);
    if line.last() == Some(&b'\r') {
        line.truncate(lf - 1);
    }
    Some(line)
}
