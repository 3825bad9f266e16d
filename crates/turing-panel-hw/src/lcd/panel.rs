//! Panel handle dispatching over hardware revisions.

use crate::orientation::Orientation;
use crate::transport::{SerialConfig, SerialTransport, Transport};
use crate::{Error, Result};
use image::{GenericImageView, Pixel};
use std::str::FromStr;
use tracing::info;

use super::device::RevAPanel;
use super::display;
use super::pixels::PixelBuffer;

/// Panel hardware revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Revision {
    /// Turing 3.5" and the USB Monitor family.
    #[default]
    A,
    B,
    C,
    D,
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Revision::A),
            "B" => Ok(Revision::B),
            "C" => Ok(Revision::C),
            "D" => Ok(Revision::D),
            _ => Err(Error::InvalidRevision(s.to_string())),
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::A => write!(f, "A"),
            Revision::B => write!(f, "B"),
            Revision::C => write!(f, "C"),
            Revision::D => write!(f, "D"),
        }
    }
}

/// An open panel.
///
/// Every method takes `&self`; commands are serialized internally so a
/// panel can be shared between threads.
pub enum Panel<T: Transport = SerialTransport> {
    RevA(RevAPanel<T>),
}

impl Panel<SerialTransport> {
    /// Opens the panel on a serial port with the default line settings.
    pub fn open(path: &str, revision: Revision) -> Result<Self> {
        Self::open_with(&SerialConfig::new(path), revision)
    }

    /// Opens the panel with explicit serial settings.
    pub fn open_with(config: &SerialConfig, revision: Revision) -> Result<Self> {
        ensure_supported(revision)?;
        let transport = SerialTransport::open(config)?;
        Self::with_transport(transport, revision)
    }
}

impl<T: Transport> Panel<T> {
    /// Runs the handshake over an already-open transport.
    pub fn with_transport(transport: T, revision: Revision) -> Result<Self> {
        let panel = match revision {
            Revision::A => Panel::RevA(RevAPanel::handshake(transport)?),
            other => return Err(Error::UnsupportedRevision(other)),
        };
        info!("Panel ready (revision {})", revision);
        Ok(panel)
    }

    /// Returns the hardware revision.
    pub fn revision(&self) -> Revision {
        match self {
            Panel::RevA(_) => Revision::A,
        }
    }

    /// Returns the native panel width.
    pub fn width(&self) -> u16 {
        match self {
            Panel::RevA(p) => p.width(),
        }
    }

    /// Returns the native panel height.
    pub fn height(&self) -> u16 {
        match self {
            Panel::RevA(p) => p.height(),
        }
    }

    /// Returns the model name reported by the handshake.
    pub fn model_name(&self) -> &'static str {
        match self {
            Panel::RevA(p) => p.model_name(),
        }
    }

    /// Gets the last orientation set.
    pub fn orientation(&self) -> Orientation {
        match self {
            Panel::RevA(p) => p.orientation(),
        }
    }

    /// Closes the transport. Safe to call more than once.
    pub fn close(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.close(),
        }
    }

    /// Reboots the panel. The panel must not be used afterwards.
    pub fn reset(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.reset(),
        }
    }

    /// Clears the display.
    pub fn clear(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.clear(),
        }
    }

    /// Fills the display with black.
    pub fn to_black(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.to_black(),
        }
    }

    /// Turns the screen on.
    pub fn screen_on(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.screen_on(),
        }
    }

    /// Turns the screen off.
    pub fn screen_off(&self) -> Result<()> {
        match self {
            Panel::RevA(p) => p.screen_off(),
        }
    }

    /// Sets the brightness (0-100).
    pub fn set_brightness(&self, level: i32) -> Result<()> {
        match self {
            Panel::RevA(p) => p.set_brightness(level),
        }
    }

    /// Sets the display orientation.
    pub fn set_orientation(&self, orientation: Orientation) -> Result<()> {
        match self {
            Panel::RevA(p) => p.set_orientation(orientation),
        }
    }

    /// Writes an already converted RGB565 buffer at `(x, y)`.
    pub fn display_rgb565(&self, pixels: &PixelBuffer, x: u32, y: u32) -> Result<()> {
        match self {
            Panel::RevA(p) => p.display_bitmap(pixels, x, y),
        }
    }

    /// Draws an image region; see [`display::display_image`].
    pub fn display_image<I, P>(
        &self,
        image: &I,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8>,
    {
        display::display_image(self, image, x, y, width, height)
    }

    /// Reads raw status bytes from the panel.
    pub fn read_bytes(&self, n: usize) -> Result<Vec<u8>> {
        match self {
            Panel::RevA(p) => p.read_bytes(n),
        }
    }
}

fn ensure_supported(revision: Revision) -> Result<()> {
    match revision {
        Revision::A => Ok(()),
        other => Err(Error::UnsupportedRevision(other)),
    }
}

/// Opens a panel on `path`.
pub fn open(path: &str, revision: Revision) -> Result<Panel> {
    Panel::open(path, revision)
}
