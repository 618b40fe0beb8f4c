//! Upstream HTTP Connector Toolkit
//!
//! The upstream half of a minimal reverse proxy: send one fixed request to an
//! already-resolved origin, then incrementally parse the response status line
//! and header block out of arbitrarily fragmented reads. Parsed headers are
//! routed through a hide/pass visibility policy before the finalized head is
//! handed to the body-forwarding layer, and protocol-mandated headers the
//! origin omitted are synthesized.
//!
//! The parsing core in [`proto`] is transport-agnostic and resumable; the
//! [`transport`] module wires it to a tokio [`TcpStream`][tokio::net::TcpStream].
#![warn(missing_debug_implementations)]

mod common;
mod log;
mod matches;

pub mod config;
pub mod cursor;
pub mod headers;
pub mod http;
pub mod parser;
pub mod policy;
pub mod proto;
pub mod request;
pub mod response;
pub mod transport;

pub use common::ParseResult;
pub use cursor::ByteCursor;
pub use policy::{Admit, HeaderPolicy};
pub use proto::{Exchange, ExchangeError, Feed};
pub use request::Target;
pub use response::ResponseHead;
pub use transport::{Connector, UpstreamResponse};
