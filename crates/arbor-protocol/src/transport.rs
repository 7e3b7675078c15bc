//! Transports carrying protocol lines to the peripheral.
//!
//! [`Transport`] is the seam between framing and I/O. Writes are blocking: a
//! push does not return until every line of the frame has been handed to the
//! socket, so a stalled peripheral stalls animation. That is accepted; there
//! is no backpressure or retry.

use std::io::{BufWriter, Write};
use std::net::TcpStream;

use tracing::info;

use crate::error::ProtocolError;

/// A sink for protocol lines.
pub trait Transport {
    /// Send one instruction. The newline terminator is added by the
    /// transport.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the line could not be written.
    fn send_line(&mut self, line: &str) -> Result<(), ProtocolError>;

    /// Push any buffered lines to the peripheral. Called once per frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the flush fails.
    fn flush(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }
}

/// Blocking TCP connection to the display peripheral.
#[derive(Debug)]
pub struct TcpTransport {
    addr: String,
    writer: BufWriter<TcpStream>,
}

impl TcpTransport {
    /// Connect to `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Connect`] if the connection is refused or
    /// the address does not resolve.
    pub fn connect(host: &str, port: u16) -> Result<Self, ProtocolError> {
        let addr = format!("{host}:{port}");
        let stream = TcpStream::connect(&addr).map_err(|source| ProtocolError::Connect {
            addr: addr.clone(),
            source,
        })?;
        stream.set_nodelay(true)?;
        info!(addr = %addr, "connected to display peripheral");
        Ok(Self {
            addr,
            writer: BufWriter::new(stream),
        })
    }

    /// The `host:port` this transport is connected to.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Transport for TcpTransport {
    fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ProtocolError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Records every line in memory. Used by tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    lines: Vec<String>,
    flushes: usize,
}

impl MemoryTransport {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            flushes: 0,
        }
    }

    /// Lines sent so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take the recorded lines, leaving the recorder empty.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Number of times [`Transport::flush`] was called.
    pub const fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Transport for MemoryTransport {
    fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.lines.push(line.to_owned());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ProtocolError> {
        self.flushes = self.flushes.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn memory_transport_records_in_order() {
        let mut transport = MemoryTransport::new();
        transport.send_line("1X").unwrap();
        transport.send_line("1D100").unwrap();
        transport.flush().unwrap();
        assert_eq!(transport.lines(), &["1X", "1D100"]);
        assert_eq!(transport.flushes(), 1);
        assert_eq!(transport.take_lines().len(), 2);
        assert!(transport.lines().is_empty());
    }

    #[test]
    fn tcp_transport_writes_newline_terminated_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let reader = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut lines = Vec::new();
            for line in BufReader::new(stream).lines() {
                lines.push(line.unwrap());
            }
            lines
        });

        let mut transport = TcpTransport::connect("127.0.0.1", port).unwrap();
        assert_eq!(transport.addr(), format!("127.0.0.1:{port}"));
        transport.send_line("2X").unwrap();
        transport.send_line("2I128").unwrap();
        transport.flush().unwrap();
        drop(transport);

        assert_eq!(reader.join().unwrap(), vec!["2X", "2I128"]);
    }

    #[test]
    fn connect_failure_reports_address() {
        // Bind then drop to find a port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = TcpTransport::connect("127.0.0.1", port).unwrap_err();
        assert!(matches!(err, ProtocolError::Connect { .. }));
        assert!(err.to_string().contains(&port.to_string()));
    }
}
