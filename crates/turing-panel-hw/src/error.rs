//! Error types for the Turing panel driver.

use crate::lcd::Revision;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The serial port could not be opened or configured.
    Open,
    /// A read or write on an open channel failed or came up short.
    Io,
    /// Caller input was rejected before any I/O happened.
    Validation,
    /// The requested panel revision has no implementation.
    UnsupportedRevision,
}

/// Errors that can occur when talking to a panel.
#[derive(Error, Debug)]
pub enum Error {
    /// Serial port could not be opened or configured.
    #[error("Serial port error: {0}")]
    Open(#[from] tokio_serial::Error),

    /// Serial I/O error.
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes arrived than the protocol requires.
    #[error("Expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// The transport accepted fewer bytes than the frame length.
    #[error("Expected to write {expected} bytes, wrote {actual}")]
    ShortWrite { expected: usize, actual: usize },

    /// The transport was already closed (after `close()` or `reset()`).
    #[error("Transport is closed")]
    Closed,

    /// Brightness outside 0-100.
    #[error("Brightness level must be in 0-100, got {0}")]
    InvalidBrightness(i32),

    /// Destination origin lies outside the panel.
    #[error("Image origin ({x}, {y}) is outside the {width}x{height} panel")]
    OriginOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Requested image dimensions are not positive.
    #[error("Image dimensions must be > 0, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid orientation value.
    #[error("Invalid orientation: {0}")]
    InvalidOrientation(String),

    /// Revision name that does not parse.
    #[error("Invalid revision: {0}")]
    InvalidRevision(String),

    /// Revision that parses but has no driver.
    #[error("Unsupported revision: {0}")]
    UnsupportedRevision(Revision),
}

impl Error {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open(_) => ErrorKind::Open,
            Error::Io(_) | Error::ShortRead { .. } | Error::ShortWrite { .. } | Error::Closed => {
                ErrorKind::Io
            }
            Error::InvalidBrightness(_)
            | Error::OriginOutOfBounds { .. }
            | Error::InvalidDimensions { .. }
            | Error::InvalidOrientation(_)
            | Error::InvalidRevision(_) => ErrorKind::Validation,
            Error::UnsupportedRevision(_) => ErrorKind::UnsupportedRevision,
        }
    }
}
