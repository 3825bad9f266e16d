//! Serial port transport.

use super::Transport;
use crate::{Error, Result};
use std::io::{self, Read, Write};
use std::time::Duration;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

/// Baud rate the panel firmware expects.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Timeout applied to every read.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial line configuration.
///
/// Framing is fixed at 8N1 without flow control. DTR and RTS are asserted
/// after open; the panel stays dark without them.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Serial port path (e.g., /dev/ttyACM0, COM3)
    pub path: String,
    /// Baud rate (default: 115200)
    pub baud_rate: u32,
    /// Read timeout (default: 1s)
    pub timeout: Duration,
}

impl SerialConfig {
    /// Creates a configuration with the panel defaults.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: READ_TIMEOUT,
        }
    }

    /// Sets the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A panel connected over a USB serial port.
pub struct SerialTransport {
    path: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Opens and configures the serial port.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let mut port = tokio_serial::new(config.path.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()?;

        port.write_data_terminal_ready(true)?;
        port.write_request_to_send(true)?;

        info!(
            "Opened serial port {} at {} baud",
            config.path, config.baud_rate
        );

        Ok(Self {
            path: config.path.clone(),
            port: Some(port),
        })
    }

    /// Returns the port path.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(Error::Closed)
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<usize> {
        write_fully(self.port()?, data)
    }

    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        read_fully(self.port()?, n)
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closed serial port {}", self.path);
        }
        Ok(())
    }

    fn clear_to_send(&mut self) -> Result<Option<bool>> {
        let port = self.port()?;
        let cts = port
            .read_clear_to_send()
            .map_err(|e| Error::Io(io::Error::from(e)))?;
        Ok(Some(cts))
    }
}

/// Writes all of `data`, continuing after partial writes.
fn write_fully<W: Write + ?Sized>(writer: &mut W, data: &[u8]) -> Result<usize> {
    let mut offset = 0;
    while offset < data.len() {
        match writer.write(&data[offset..]) {
            Ok(0) => {
                return Err(Error::ShortWrite {
                    expected: data.len(),
                    actual: offset,
                })
            }
            Ok(n) => offset += n,
            // Only reads are bounded by the timeout.
            Err(e)
                if e.kind() == io::ErrorKind::Interrupted
                    || e.kind() == io::ErrorKind::TimedOut =>
            {
                continue
            }
            Err(e) => return Err(e.into()),
        }
    }
    writer.flush()?;
    Ok(offset)
}

/// Reads exactly `n` bytes. A timeout before that is a short read.
fn read_fully<R: Read + ?Sized>(reader: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; n];
    let mut filled = 0;
    while filled < n {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(k) => filled += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) => return Err(e.into()),
        }
    }
    if filled != n {
        return Err(Error::ShortRead {
            expected: n,
            actual: filled,
        });
    }
    Ok(buffer)
}
