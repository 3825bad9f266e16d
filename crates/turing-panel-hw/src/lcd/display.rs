//! Pushing host images to the panel.
//!
//! A request names a destination rectangle on the panel. It is validated
//! against the panel bounds, clipped to fit, converted to RGB565 and sent as
//! a single bitmap window.

use crate::transport::Transport;
use crate::{Error, Result};
use image::{GenericImageView, Pixel};
use tracing::debug;

use super::panel::Panel;
use super::pixels::convert_region;

/// A rectangle in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A validated, clipped transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Destination on the panel; always inside the panel bounds.
    pub region: Rect,
    /// Source pixel that lands on the region's top-left corner.
    pub source: (u32, u32),
}

/// Validates and clips a request.
///
/// A zero `width` or `height` in `request` means "the image's own extent".
/// Returns `Ok(None)` when clipping leaves nothing to send.
pub fn plan_transfer(
    panel_size: (u32, u32),
    image_size: (u32, u32),
    request: Rect,
) -> Result<Option<Transfer>> {
    let (panel_width, panel_height) = panel_size;
    let (image_width, image_height) = image_size;
    let Rect { x, y, .. } = request;

    let mut width = if request.width == 0 {
        image_width
    } else {
        request.width
    };
    let mut height = if request.height == 0 {
        image_height
    } else {
        request.height
    };

    if x > panel_width || y > panel_height {
        return Err(Error::OriginOutOfBounds {
            x,
            y,
            width: panel_width,
            height: panel_height,
        });
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    if x.saturating_add(width) > panel_width {
        width = panel_width - x;
    }
    if y.saturating_add(height) > panel_height {
        height = panel_height - y;
    }
    if width == 0 || height == 0 {
        debug!("Nothing to draw at ({}, {}) after clipping", x, y);
        return Ok(None);
    }

    // A cropped transfer reads the source at the destination offset, so the
    // source is addressed in panel coordinates.
    let source = if width != image_width || height != image_height {
        (x, y)
    } else {
        (0, 0)
    };

    Ok(Some(Transfer {
        region: Rect::new(x, y, width, height),
        source,
    }))
}

/// Draws `image` on the panel at `(x, y)`.
///
/// `width`/`height` of 0 default to the image's extent. The region is clipped
/// to the panel; a region clipped to nothing is not an error. Images with
/// samples wider than 8 bits are passed as a [`image::DynamicImage`].
pub fn display_image<T, I, P>(
    panel: &Panel<T>,
    image: &I,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<()>
where
    T: Transport,
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let panel_size = (panel.width() as u32, panel.height() as u32);
    let Some(transfer) = plan_transfer(
        panel_size,
        image.dimensions(),
        Rect::new(x, y, width, height),
    )?
    else {
        return Ok(());
    };

    let Transfer { region, source } = transfer;
    let pixels = convert_region(image, source.0, source.1, region.width, region.height);
    panel.display_rgb565(&pixels, region.x, region.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::protocol::{command4, Command};
    use crate::lcd::Revision;
    use crate::transport::MemoryTransport;
    use image::{ImageBuffer, Rgb, RgbImage};

    const PANEL: (u32, u32) = (320, 480);

    fn open_panel() -> (Panel<MemoryTransport>, MemoryTransport) {
        let probe = MemoryTransport::with_response(&[0; 6]);
        let panel = Panel::with_transport(probe.clone(), Revision::A).unwrap();
        probe.take_written();
        (panel, probe)
    }

    #[test]
    fn test_clip_right_edge() {
        let transfer = plan_transfer(PANEL, (320, 480), Rect::new(300, 0, 100, 50))
            .unwrap()
            .unwrap();
        assert_eq!(transfer.region, Rect::new(300, 0, 20, 50));
        assert_eq!(transfer.source, (300, 0));
    }

    #[test]
    fn test_default_dimensions_from_image() {
        let transfer = plan_transfer(PANEL, (100, 40), Rect::new(10, 10, 0, 0))
            .unwrap()
            .unwrap();
        assert_eq!(transfer.region, Rect::new(10, 10, 100, 40));
        assert_eq!(transfer.source, (0, 0));
    }

    #[test]
    fn test_origin_outside_panel() {
        assert!(matches!(
            plan_transfer(PANEL, (10, 10), Rect::new(321, 0, 10, 10)),
            Err(Error::OriginOutOfBounds { .. })
        ));
        assert!(matches!(
            plan_transfer(PANEL, (10, 10), Rect::new(0, 481, 10, 10)),
            Err(Error::OriginOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            plan_transfer(PANEL, (0, 0), Rect::new(0, 0, 0, 0)),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_origin_on_edge_is_noop() {
        assert_eq!(
            plan_transfer(PANEL, (10, 10), Rect::new(320, 0, 10, 10)).unwrap(),
            None
        );
    }

    #[test]
    fn test_display_full_screen() {
        let (panel, probe) = open_panel();
        let image: RgbImage = ImageBuffer::from_pixel(320, 480, Rgb([255, 0, 0]));
        panel.display_image(&image, 0, 0, 0, 0).unwrap();

        let written = probe.written();
        assert_eq!(&written[..6], &command4(Command::DisplayBitmap, 0, 0, 319, 479));
        assert_eq!(written.len(), 6 + 320 * 480 * 2);
        assert_eq!(&written[6..8], &[0x00, 0xF8]);
    }

    #[test]
    fn test_display_clipped_reads_at_destination() {
        let (panel, probe) = open_panel();
        let image = ImageBuffer::from_fn(320, 480, |x, _| {
            if x >= 300 {
                Rgb([0u8, 0, 255])
            } else {
                Rgb([255, 255, 255])
            }
        });
        panel.display_image(&image, 300, 0, 100, 50).unwrap();

        let written = probe.written();
        assert_eq!(&written[..6], &command4(Command::DisplayBitmap, 300, 0, 319, 49));
        let payload = &written[6..];
        assert_eq!(payload.len(), 20 * 50 * 2);
        assert!(payload.chunks(2).all(|s| s == [0x1F, 0x00]));
    }

    #[test]
    fn test_display_noop_writes_nothing() {
        let (panel, probe) = open_panel();
        let image: RgbImage = ImageBuffer::new(8, 8);
        panel.display_image(&image, 320, 480, 8, 8).unwrap();
        assert!(probe.written().is_empty());
    }
}
