//! Tokio transport adapter.
//!
//! Owns the collaborator role around an [`Exchange`]: connect to the resolved
//! target, write the request, then read-and-feed until the response head is
//! complete. Body transfer belongs to the caller, which receives the parsed
//! head together with the live connection.

#[cfg(test)]
mod test;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::UpstreamConfig;
use crate::log::debug;
use crate::policy::HeaderPolicy;
use crate::proto::{Exchange, ExchangeError, Feed};
use crate::request::Target;
use crate::response::ResponseHead;

/// Outbound connector for proxied exchanges.
///
/// Cheap to clone; concurrent exchanges share only the read-only policy.
#[derive(Debug, Clone)]
pub struct Connector {
    policy: Arc<HeaderPolicy>,
    config: UpstreamConfig,
}

impl Connector {
    /// Connector with the default configuration.
    pub fn new(policy: Arc<HeaderPolicy>) -> Self {
        Self::with_config(policy, UpstreamConfig::default())
    }

    /// Connector with explicit timeouts and limits.
    pub fn with_config(policy: Arc<HeaderPolicy>, config: UpstreamConfig) -> Self {
        Self { policy, config }
    }

    /// Run one exchange up to the point where the body begins.
    ///
    /// Every await is bounded by the corresponding configured timeout; a
    /// timeout surfaces as an ordinary [`Transport`] failure, and the dropped
    /// connection closes the exchange (requests carry `Connection: close`,
    /// nothing is reused).
    ///
    /// [`Transport`]: ExchangeError::Transport
    pub async fn dispatch(&self, target: &Target) -> Result<UpstreamResponse, ExchangeError> {
        let mut exchange = Exchange::new(self.policy.clone(), &self.config);

        let mut stream = expire(
            self.config.connect_timeout,
            TcpStream::connect(target.addr()),
        )
        .await?;
        debug!("connected to upstream {}", target.addr());

        let request = exchange.begin(target);
        expire(self.config.send_timeout, stream.write_all(&request)).await?;
        exchange.write_complete();

        let mut chunk = BytesMut::with_capacity(4096);
        loop {
            chunk.clear();
            let read = expire(self.config.read_timeout, stream.read_buf(&mut chunk)).await?;
            if read == 0 {
                exchange.abort();
                return Err(ExchangeError::Transport(io::ErrorKind::UnexpectedEof.into()));
            }

            if exchange.feed(&chunk)? == Feed::ReadyForBody {
                break;
            }
        }

        let (head, body_prefix) = exchange.into_body_parts()?;
        Ok(UpstreamResponse {
            head,
            body_prefix: body_prefix.freeze(),
            stream,
        })
    }
}

/// Parsed head plus the live connection, for the body-forwarding layer.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub head: ResponseHead,
    /// Body bytes that arrived in the same reads as the head.
    pub body_prefix: Bytes,
    /// The remaining connection; the origin closes it after the body.
    pub stream: TcpStream,
}

async fn expire<T>(
    limit: Duration,
    fut: impl Future<Output = io::Result<T>>,
) -> Result<T, ExchangeError> {
    match timeout(limit, fut).await {
        Ok(Ok(ok)) => Ok(ok),
        Ok(Err(err)) => Err(ExchangeError::Transport(err)),
        Err(_) => Err(ExchangeError::Transport(io::ErrorKind::TimedOut.into())),
    }
}
