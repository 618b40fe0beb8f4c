//! Exchange coordinator.
//!
//! One [`Exchange`] drives a single proxied request/response pair: build the
//! outbound request, then parse whatever the transport has read so far,
//! routing each parsed header through the visibility policy and synthesizing
//! the protocol-mandated ones the origin omitted. Progress is cooperative:
//! every [`feed`] call either completes structural units or reports
//! [`Feed::NeedMoreData`], and the caller re-invokes when the next read
//! arrives. Nothing blocks.
//!
//! Exchanges are single-use. Once the head is handed over (or the exchange
//! fails), the outbound connection is done for, consistent with the
//! `Connection: close` request this connector sends.
//!
//! [`feed`]: Exchange::feed

mod error;


pub use error::ExchangeError;

use std::sync::Arc;

use bytes::{Bytes, BytesMut};

use crate::common::ParseResult;
use crate::config::UpstreamConfig;
use crate::cursor::ByteCursor;
use crate::headers::{HeaderName, HeaderValue};
use crate::http::{StatusCode, Version};
use crate::log::{debug, error, warning};
use crate::parser::{self, RawHeader};
use crate::policy::{Admit, HeaderPolicy};
use crate::request::{self, Target};
use crate::response::ResponseHead;

/// Exchange lifecycle. `Failed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Created,
    SendingRequest,
    AwaitingStatusLine,
    AwaitingHeaders,
    ReadyForBody,
    Finished,
    Failed,
}

/// Progress reported by [`Exchange::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// No further structural unit is buffered; call again after the next read.
    NeedMoreData,
    /// Header block complete and mandatory headers injected; any bytes still
    /// buffered belong to the body.
    ReadyForBody,
}

/// One proxied request/response pair against the origin.
///
/// Owned by exactly one connection task; concurrent exchanges share only the
/// read-only [`HeaderPolicy`].
#[derive(Debug)]
pub struct Exchange {
    state: State,
    cursor: ByteCursor,
    policy: Arc<HeaderPolicy>,
    max_head: usize,
    head: ResponseHead,
    saw_server: bool,
    saw_date: bool,
}

impl Exchange {
    /// Create an exchange in the `Created` state.
    pub fn new(policy: Arc<HeaderPolicy>, config: &UpstreamConfig) -> Self {
        Self {
            state: State::Created,
            cursor: ByteCursor::new(),
            policy,
            max_head: config.max_head_bytes,
            head: ResponseHead::new(),
            saw_server: false,
            saw_date: false,
        }
    }

    /// Build the outbound request buffer and start sending.
    ///
    /// Valid once, in the `Created` state.
    pub fn begin(&mut self, target: &Target) -> Bytes {
        debug_assert_eq!(self.state, State::Created, "begin called twice");
        self.state = State::SendingRequest;
        request::build(target)
    }

    /// The transport finished writing the request; response bytes may follow.
    ///
    /// Partial-write bookkeeping is the transport's job, so this is the only
    /// send-side signal the coordinator needs.
    pub fn write_complete(&mut self) {
        if self.state == State::SendingRequest {
            self.state = State::AwaitingStatusLine;
        }
    }

    /// Deliver newly read origin bytes and drive the parsers.
    ///
    /// Drains every structural unit already buffered before yielding, so one
    /// read carrying the whole head completes in one call. On `Err` the
    /// exchange is failed and must be discarded.
    pub fn feed(&mut self, data: &[u8]) -> Result<Feed, ExchangeError> {
        if !matches!(
            self.state,
            State::AwaitingStatusLine | State::AwaitingHeaders
        ) {
            if self.state != State::Finished {
                self.state = State::Failed;
            }
            return Err(ExchangeError::Aborted);
        }

        self.cursor.append(data);

        loop {
            match self.state {
                State::AwaitingStatusLine => match parser::parse_status_chunk(&mut self.cursor) {
                    ParseResult::Pending => return self.need_more(),
                    ParseResult::Ok(status) => {
                        self.head.version = status.version;
                        self.head.status = status.code;
                        self.head.reason = status.reason;
                        self.state = State::AwaitingHeaders;
                    }
                    ParseResult::Err(_) => {
                        // Some legacy origins answer without a status line;
                        // forward the response anyway as HTTP/0.9 with an
                        // implied 200. The offending line is already consumed.
                        warning!("upstream sent no valid HTTP/1.0 header, assuming HTTP/0.9");
                        self.head.version = Version::HTTP_09;
                        self.head.status = StatusCode::OK;
                        self.state = State::AwaitingHeaders;
                    }
                },
                State::AwaitingHeaders => match parser::parse_header_chunk(&mut self.cursor) {
                    ParseResult::Pending => return self.need_more(),
                    ParseResult::Ok(Some(raw)) => self.observe(raw),
                    ParseResult::Ok(None) => {
                        self.inject_mandatory();
                        self.state = State::ReadyForBody;
                        return Ok(Feed::ReadyForBody);
                    }
                    ParseResult::Err(err) => {
                        error!("upstream sent invalid header: {err}");
                        self.state = State::Failed;
                        return Err(ExchangeError::InvalidHeader(err));
                    }
                },
                _ => unreachable!("feed past header completion"),
            }
        }
    }

    fn need_more(&mut self) -> Result<Feed, ExchangeError> {
        if self.cursor.len() > self.max_head {
            error!(
                "upstream response head exceeds {} buffered bytes",
                self.max_head
            );
            self.state = State::Failed;
            return Err(ExchangeError::HeadTooLarge);
        }
        Ok(Feed::NeedMoreData)
    }

    /// Record one parsed header, then let the policy decide its fate.
    ///
    /// Observation happens before admission: a hidden `Server` still counts
    /// as present and suppresses injection, exactly like a forwarded one.
    fn observe(&mut self, raw: RawHeader) {
        let name = HeaderName::from_parsed(raw.name);
        let value = HeaderValue::from_parsed(raw.value);

        match name.lowercase() {
            "server" => self.saw_server = true,
            "date" => self.saw_date = true,
            _ => {}
        }

        match self.policy.admit(name.lowercase()) {
            Admit::Forward => self.head.headers.append(name, value),
            Admit::Drop => {
                debug!("hide upstream header \"{name}\"");
            }
        }
    }

    /// Append `Server` and `Date` entries when the origin sent neither.
    ///
    /// Absence is the reason these exist, so they bypass the policy.
    fn inject_mandatory(&mut self) {
        if !self.saw_server {
            self.head.headers.append(
                HeaderName::from_static_parts("Server", "server"),
                HeaderValue::empty(),
            );
        }
        if !self.saw_date {
            self.head.headers.append(
                HeaderName::from_static_parts("Date", "date"),
                HeaderValue::empty(),
            );
        }
    }

    /// The response head as parsed so far.
    #[inline]
    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    /// Finalized head plus the buffered start of the body.
    ///
    /// Valid in `ReadyForBody`; the body-forwarding layer takes over the
    /// connection from here.
    pub fn into_body_parts(self) -> Result<(ResponseHead, BytesMut), ExchangeError> {
        if self.state != State::ReadyForBody {
            return Err(ExchangeError::Aborted);
        }
        let Self {
            head, mut cursor, ..
        } = self;
        Ok((head, cursor.take_rest()))
    }

    /// Body-forwarding collaborator finished streaming.
    pub fn finish(&mut self) {
        if self.state == State::ReadyForBody {
            self.state = State::Finished;
        }
    }

    /// Client went away; fail the exchange and discard buffered data.
    ///
    /// There is no partial-result salvage.
    pub fn abort(&mut self) {
        if self.state != State::Finished {
            self.state = State::Failed;
        }
        self.cursor.take_rest();
    }

    /// Target resolution failed before any bytes moved.
    pub fn target_unresolvable(&mut self) {
        self.abort();
    }

    /// Returns `true` once the exchange is failed. Absorbing.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.state == State::Failed
    }

    /// Returns `true` once the body collaborator reported completion.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }
}
