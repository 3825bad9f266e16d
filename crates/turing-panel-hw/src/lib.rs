//! Turing Panel Hardware Library
//!
//! Driver for small USB-attached LCD panels (Turing Smart Screen 3.5" and the
//! "USB Monitor" family) that speak a fixed-frame command protocol over a
//! serial port.

pub mod error;
pub mod lcd;
pub mod orientation;
pub mod transport;

pub use error::{Error, ErrorKind, Result};
pub use lcd::{open, Panel, PixelBuffer, Rect, Revision};
pub use orientation::Orientation;
pub use transport::{MemoryTransport, SerialConfig, SerialTransport, Transport};
