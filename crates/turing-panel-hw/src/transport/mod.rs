//! Byte channel between the host and the panel.
//!
//! The panel protocol only needs four things from its channel: write every
//! byte of a buffer, read an exact number of bytes, close, and (for
//! diagnostics) report the CTS line. [`SerialTransport`] is the real device;
//! [`MemoryTransport`] stands in for it in tests.

mod memory;
mod serial;

pub use memory::MemoryTransport;
pub use serial::{SerialConfig, SerialTransport, DEFAULT_BAUD_RATE, READ_TIMEOUT};

use crate::Result;

/// Blocking, full-duplex byte channel.
pub trait Transport: Send {
    /// Writes the whole buffer, looping over partial writes.
    ///
    /// Returns the number of bytes written, which equals `data.len()` on
    /// success.
    fn write_all(&mut self, data: &[u8]) -> Result<usize>;

    /// Reads exactly `n` bytes. Fewer bytes before the read timeout is an error.
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Closes the channel. Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Reports the CTS modem line, if the host exposes it.
    fn clear_to_send(&mut self) -> Result<Option<bool>> {
        Ok(None)
    }
}
