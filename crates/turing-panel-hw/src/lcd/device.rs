//! Revision A panel session.

use crate::orientation::Orientation;
use crate::transport::Transport;
use crate::{Error, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::fingerprint::{self, PanelModel, IDENTITY_LEN};
use super::pixels::PixelBuffer;
use super::protocol::{
    command0, command1, command4, hello, orientation_frame, Command, MAX_COORD,
};

/// Highest brightness accepted by [`RevAPanel::set_brightness`].
pub const MAX_BRIGHTNESS: i32 = 100;

/// Maps a 0-100 brightness level onto the panel's inverted 0-255 scale.
///
/// 0 maps to 255 (dimmest) and 100 to 0 (brightest). The scaled level is
/// truncated before it is subtracted, so 1 maps to 253 and 50 to 128.
pub fn absolute_brightness(level: i32) -> Result<u16> {
    if !(0..=MAX_BRIGHTNESS).contains(&level) {
        return Err(Error::InvalidBrightness(level));
    }
    Ok((255 - 255 * level / MAX_BRIGHTNESS) as u16)
}

/// Session with a revision A panel.
///
/// The transport sits behind a mutex held for the whole of each command, so
/// a bitmap frame and its payload are never split by another caller.
pub struct RevAPanel<T: Transport> {
    model: &'static PanelModel,
    transport: Mutex<T>,
    orientation: Mutex<Orientation>,
}

impl<T: Transport> RevAPanel<T> {
    /// Performs the hello handshake and identifies the panel.
    ///
    /// The transport is closed if the handshake fails.
    pub fn handshake(mut transport: T) -> Result<Self> {
        match transport.clear_to_send() {
            Ok(Some(true)) => debug!("CTS asserted"),
            Ok(Some(false)) => {
                warn!("CTS is not asserted; rendering may not work as expected on this host")
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read modem status: {}", e),
        }

        let model = match identify(&mut transport) {
            Ok(model) => model,
            Err(e) => {
                if let Err(close_err) = transport.close() {
                    debug!("Close after failed handshake: {}", close_err);
                }
                return Err(e);
            }
        };

        info!(
            "Panel identified as {} ({}x{})",
            model.name, model.width, model.height
        );

        Ok(Self {
            model,
            transport: Mutex::new(transport),
            orientation: Mutex::new(Orientation::default()),
        })
    }

    /// Returns the native panel width.
    pub fn width(&self) -> u16 {
        self.model.width
    }

    /// Returns the native panel height.
    pub fn height(&self) -> u16 {
        self.model.height
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &'static str {
        self.model.name
    }

    /// Gets the last orientation set.
    pub fn orientation(&self) -> Orientation {
        *self
            .orientation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Closes the transport. Safe to call more than once.
    pub fn close(&self) -> Result<()> {
        self.transport().close()
    }

    /// Reboots the panel and closes the transport.
    ///
    /// The session is unusable afterwards; further commands fail with
    /// [`Error::Closed`].
    pub fn reset(&self) -> Result<()> {
        let mut transport = self.transport();
        write_frame(&mut *transport, &command0(Command::Reset))?;
        transport.close()?;
        info!("Panel reset, transport closed");
        Ok(())
    }

    /// Clears the display.
    pub fn clear(&self) -> Result<()> {
        self.send(&command0(Command::Clear))
    }

    /// Fills the display with black.
    pub fn to_black(&self) -> Result<()> {
        self.send(&command0(Command::ToBlack))
    }

    /// Turns the screen off.
    pub fn screen_off(&self) -> Result<()> {
        self.send(&command0(Command::ScreenOff))
    }

    /// Turns the screen on.
    pub fn screen_on(&self) -> Result<()> {
        self.send(&command0(Command::ScreenOn))
    }

    /// Sets the brightness (0-100).
    pub fn set_brightness(&self, level: i32) -> Result<()> {
        let absolute = absolute_brightness(level)?;
        self.send(&command1(Command::SetBrightness, absolute))?;
        debug!("Set brightness to {} (device value {})", level, absolute);
        Ok(())
    }

    /// Sets the display orientation.
    ///
    /// The frame always carries the native width and height.
    pub fn set_orientation(&self, orientation: Orientation) -> Result<()> {
        let frame = orientation_frame(orientation, self.width(), self.height());
        // Record under the transport lock so the stored value matches the
        // last frame on the wire.
        let mut transport = self.transport();
        write_frame(&mut *transport, &frame)?;
        *self
            .orientation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = orientation;
        drop(transport);
        debug!("Set orientation to {}", orientation);
        Ok(())
    }

    /// Writes an RGB565 buffer with its top-left corner at `(x, y)`.
    pub fn display_bitmap(&self, pixels: &PixelBuffer, x: u32, y: u32) -> Result<()> {
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let panel_width = self.width() as u32;
        let panel_height = self.height() as u32;
        let fits = x
            .checked_add(width)
            .is_some_and(|right| right <= panel_width)
            && y
                .checked_add(height)
                .is_some_and(|bottom| bottom <= panel_height);
        if !fits {
            return Err(Error::OriginOutOfBounds {
                x,
                y,
                width: panel_width,
                height: panel_height,
            });
        }

        let x1 = x + width - 1;
        let y1 = y + height - 1;
        debug_assert!(x1 <= MAX_COORD as u32 && y1 <= MAX_COORD as u32);
        let frame = command4(
            Command::DisplayBitmap,
            x as u16,
            y as u16,
            x1 as u16,
            y1 as u16,
        );

        let mut transport = self.transport();
        write_frame(&mut *transport, &frame)?;
        write_payload(&mut *transport, pixels.data())?;
        debug!(
            "Bitmap at ({}, {}) {}x{} ({} bytes)",
            x,
            y,
            width,
            height,
            pixels.data().len()
        );
        Ok(())
    }

    /// Reads `n` bytes from the panel.
    pub fn read_bytes(&self, n: usize) -> Result<Vec<u8>> {
        self.transport().read_exact(n)
    }

    fn send(&self, frame: &[u8]) -> Result<()> {
        write_frame(&mut *self.transport(), frame)
    }

    fn transport(&self) -> MutexGuard<'_, T> {
        self.transport.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn identify<T: Transport>(transport: &mut T) -> Result<&'static PanelModel> {
    write_frame(transport, &hello())?;
    let response = transport.read_exact(IDENTITY_LEN)?;
    match fingerprint::lookup(&response) {
        Some(model) => Ok(model),
        None => {
            let model = fingerprint::identify(&response);
            warn!(
                "Unrecognized identity response {:02X?}, assuming {}x{}",
                response, model.width, model.height
            );
            Ok(model)
        }
    }
}

fn write_frame<T: Transport + ?Sized>(transport: &mut T, frame: &[u8]) -> Result<()> {
    write_payload(transport, frame)?;
    debug!("Sent frame {:02X?}", frame);
    Ok(())
}

fn write_payload<T: Transport + ?Sized>(transport: &mut T, data: &[u8]) -> Result<()> {
    let written = transport.write_all(data)?;
    if written != data.len() {
        return Err(Error::ShortWrite {
            expected: data.len(),
            actual: written,
        });
    }
    Ok(())
}
