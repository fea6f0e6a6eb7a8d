//! TCP Client
//!
//! Blocking connection to the store used as the benchmark transport.

use std::io::{BufReader, BufWriter, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::protocol::{read_response, write_command, Command, Response};
use super::Transport;

/// Where the connection is in the request/reply cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeState {
    /// Ready for the next request
    Idle,

    /// A request was sent, its reply not yet read
    AwaitingReply,

    /// An exchange failed halfway; reply pairing is lost for good
    Desynchronized,
}

/// Blocking client for a single store connection
pub struct Client {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Endpoint for logging
    endpoint: String,

    state: ExchangeState,
}

impl Client {
    /// Connect to the store
    ///
    /// A zero timeout means "no timeout": connect uses the OS default and
    /// requests block until the store replies.
    pub fn connect(endpoint: &str, connect_timeout_ms: u64, request_timeout_ms: u64) -> Result<Self> {
        let connection_error = |source: std::io::Error| BenchError::Connection {
            endpoint: endpoint.to_string(),
            source,
        };

        let stream = if connect_timeout_ms > 0 {
            let addrs: Vec<SocketAddr> = endpoint
                .to_socket_addrs()
                .map_err(connection_error)?
                .collect();
            connect_any(&addrs, Duration::from_millis(connect_timeout_ms))
                .map_err(connection_error)?
        } else {
            TcpStream::connect(endpoint).map_err(connection_error)?
        };

        // Disable Nagle's algorithm: every request is a tiny latency-critical write
        stream.set_nodelay(true).map_err(connection_error)?;

        if request_timeout_ms > 0 {
            let timeout = Some(Duration::from_millis(request_timeout_ms));
            stream.set_read_timeout(timeout).map_err(connection_error)?;
            stream.set_write_timeout(timeout).map_err(connection_error)?;
        }

        let read_stream = stream.try_clone().map_err(connection_error)?;

        tracing::debug!("Connected to {}", endpoint);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            endpoint: endpoint.to_string(),
            state: ExchangeState::Idle,
        })
    }

    /// Get the endpoint string
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// True once a failed exchange has made the connection unusable
    pub fn is_desynchronized(&self) -> bool {
        self.state == ExchangeState::Desynchronized
    }

    /// Flush and shut down both directions of the socket
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Transport for Client {
    fn send(&mut self, command: &Command) -> Result<()> {
        match self.state {
            ExchangeState::Desynchronized => return Err(BenchError::Desynchronized),
            ExchangeState::AwaitingReply => {
                return Err(BenchError::Protocol(format!(
                    "cannot send {} {}: previous reply not yet received",
                    command.command_type(),
                    command.key()
                )))
            }
            ExchangeState::Idle => {}
        }

        tracing::trace!("Sending to {}: {:?}", self.endpoint, command);

        // A failed write may have put a partial line on the wire
        if let Err(e) = write_command(&mut self.writer, command) {
            self.state = ExchangeState::Desynchronized;
            return Err(e);
        }

        self.state = ExchangeState::AwaitingReply;
        Ok(())
    }

    fn receive(&mut self) -> Result<Response> {
        match self.state {
            ExchangeState::Desynchronized => return Err(BenchError::Desynchronized),
            ExchangeState::Idle => {
                return Err(BenchError::Protocol(
                    "receive called with no request outstanding".to_string(),
                ))
            }
            ExchangeState::AwaitingReply => {}
        }

        match read_response(&mut self.reader) {
            Ok(response) => {
                self.state = ExchangeState::Idle;
                Ok(response)
            }
            Err(e) => {
                // Timeout, EOF or reset: a late reply would pair with the next request
                tracing::warn!("Lost reply pairing with {}: {}", self.endpoint, e);
                self.state = ExchangeState::Desynchronized;
                Err(e)
            }
        }
    }
}

/// Try each resolved address in turn, returning the first that connects
fn connect_any(addrs: &[SocketAddr], timeout: Duration) -> std::io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "endpoint resolved to no addresses")
    }))
}
