//! RGB565 pixel buffers and image conversion.

use image::{GenericImageView, Pixel, Rgb};

/// Bytes per RGB565 sample.
pub const BYTES_PER_PIXEL: usize = 2;

/// Tightly packed RGB565 pixels, little-endian, row-major.
///
/// This is the exact byte layout the panel expects after a bitmap frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            data: vec![0; size],
            width,
            height,
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Returns the raw payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fills the buffer with a solid color.
    pub fn fill(&mut self, color: u16) {
        for sample in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            sample.copy_from_slice(&color.to_le_bytes());
        }
    }

    /// Sets a pixel at the given coordinates. Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u16) {
        if let Some(idx) = self.offset(x, y) {
            self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_le_bytes());
        }
    }

    /// Gets a pixel at the given coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u16> {
        self.offset(x, y)
            .map(|idx| u16::from_le_bytes([self.data[idx], self.data[idx + 1]]))
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.stride() + x as usize * BYTES_PER_PIXEL)
        } else {
            None
        }
    }
}

/// Converts RGB888 to RGB565.
#[inline]
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Converts a `width` x `height` region of `image`, starting at
/// `(origin_x, origin_y)`, into an RGB565 buffer.
///
/// Alpha is dropped. Samples that fall outside the source image are black.
///
/// Any 8-bit pixel type is read directly. Sources with wider samples
/// (16-bit or float buffers) go through [`image::DynamicImage`], whose view
/// yields 8-bit RGBA for every color type it holds.
pub fn convert_region<I, P>(
    image: &I,
    origin_x: u32,
    origin_y: u32,
    width: u32,
    height: u32,
) -> PixelBuffer
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let mut buffer = PixelBuffer::new(width, height);
    for dy in 0..height {
        for dx in 0..width {
            let (sx, sy) = match (origin_x.checked_add(dx), origin_y.checked_add(dy)) {
                (Some(sx), Some(sy)) => (sx, sy),
                _ => continue,
            };
            if !image.in_bounds(sx, sy) {
                continue;
            }
            let Rgb([r, g, b]) = image.get_pixel(sx, sy).to_rgb();
            buffer.set_pixel(dx, dy, rgb888_to_rgb565(r, g, b));
        }
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn test_rgb565_conversion() {
        // Pure red
        assert_eq!(rgb888_to_rgb565(255, 0, 0), 0xF800);
        // Pure green
        assert_eq!(rgb888_to_rgb565(0, 255, 0), 0x07E0);
        // Pure blue
        assert_eq!(rgb888_to_rgb565(0, 0, 255), 0x001F);
        assert_eq!(rgb888_to_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(rgb888_to_rgb565(0, 0, 0), 0x0000);
        // Low bits are truncated, not rounded
        assert_eq!(rgb888_to_rgb565(7, 3, 7), 0x0000);
    }

    #[test]
    fn test_buffer_layout() {
        let mut buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.stride(), 6);
        assert_eq!(buffer.data().len(), 12);

        buffer.set_pixel(1, 1, 0xF800);
        assert_eq!(&buffer.data()[8..10], &[0x00, 0xF8]);
        assert_eq!(buffer.get_pixel(1, 1), Some(0xF800));
        assert_eq!(buffer.get_pixel(3, 0), None);
    }

    #[test]
    fn test_fill() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.fill(0x07E0);
        assert!(buffer.data().chunks(2).all(|s| s == [0xE0, 0x07]));
    }

    #[test]
    fn test_convert_ignores_alpha() {
        let image: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([255, 0, 0, 0]));
        let buffer = convert_region(&image, 0, 0, 2, 2);
        assert_eq!(buffer.get_pixel(0, 0), Some(0xF800));
        assert_eq!(buffer.get_pixel(1, 1), Some(0xF800));
    }

    #[test]
    fn test_convert_region_offset() {
        let image = ImageBuffer::from_fn(4, 4, |x, y| {
            if x >= 2 && y >= 1 {
                Rgba([0u8, 0, 255, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let buffer = convert_region(&image, 2, 1, 2, 3);
        assert_eq!((buffer.width(), buffer.height()), (2, 3));
        for y in 0..3 {
            for x in 0..2 {
                assert_eq!(buffer.get_pixel(x, y), Some(0x001F));
            }
        }
    }

    #[test]
    fn test_convert_outside_source_is_black() {
        let image: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let buffer = convert_region(&image, 1, 1, 2, 2);
        assert_eq!(buffer.get_pixel(0, 0), Some(0xFFFF));
        assert_eq!(buffer.get_pixel(1, 0), Some(0x0000));
        assert_eq!(buffer.get_pixel(0, 1), Some(0x0000));
    }

    #[test]
    fn test_convert_wide_samples_via_dynamic_image() {
        let deep = ImageBuffer::from_pixel(2, 1, Rgb([u16::MAX, 0, 0]));
        let image = DynamicImage::ImageRgb16(deep);
        let buffer = convert_region(&image, 0, 0, 2, 1);
        assert_eq!(buffer.get_pixel(1, 0), Some(0xF800));

        let float = ImageBuffer::from_pixel(1, 1, Rgba([0.0f32, 0.0, 1.0, 0.5]));
        let image = DynamicImage::ImageRgba32F(float);
        assert_eq!(convert_region(&image, 0, 0, 1, 1).get_pixel(0, 0), Some(0x001F));
    }

    #[test]
    fn test_convert_grayscale() {
        let image = ImageBuffer::from_pixel(1, 1, Luma([255u8]));
        let buffer = convert_region(&image, 0, 0, 1, 1);
        assert_eq!(buffer.get_pixel(0, 0), Some(0xFFFF));
    }
}
