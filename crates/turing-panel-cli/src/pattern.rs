//! Procedural demo pattern.

use anyhow::{Context, Result};
use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Angle between successive petals, in degrees.
const PETAL_STEP: usize = 15;

/// Renders a fan of ellipses rotated about the center, offset by `frame`.
pub fn render(width: u32, height: u32, frame: u32) -> Result<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height).context("Invalid pattern dimensions")?;
    pixmap.fill(Color::BLACK);

    let size = width.min(height) as f32;
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let petal = Rect::from_xywh(
        cx - size * 7.0 / 16.0,
        cy - size / 8.0,
        size * 7.0 / 8.0,
        size / 4.0,
    )
    .and_then(PathBuilder::from_oval)
    .context("Invalid petal geometry")?;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    for (i, angle) in (0..360).step_by(PETAL_STEP).enumerate() {
        let hue = (i * PETAL_STEP + frame as usize * 7) % 360;
        let (r, g, b) = hue_to_rgb(hue as f32);
        paint.set_color_rgba8(r, g, b, 160);
        let rotation = Transform::from_rotate_at(angle as f32 + frame as f32 * 3.0, cx, cy);
        pixmap.fill_path(&petal, &paint, FillRule::Winding, rotation, None);
    }

    // Everything drawn over an opaque black background, so the data is
    // straight (non-premultiplied) RGBA already.
    RgbaImage::from_raw(width, height, pixmap.take()).context("Pixmap size mismatch")
}

/// Fully saturated color for a hue in degrees.
fn hue_to_rgb(hue: f32) -> (u8, u8, u8) {
    let h = (hue % 360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    (
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dimensions() {
        let image = render(320, 480, 0).unwrap();
        assert_eq!(image.dimensions(), (320, 480));
    }

    #[test]
    fn test_render_is_opaque() {
        let image = render(64, 64, 3).unwrap();
        assert!(image.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_center_is_painted() {
        let image = render(64, 64, 0).unwrap();
        let center = image.get_pixel(32, 32);
        assert_ne!(&center.0[..3], &[0, 0, 0]);
    }

    #[test]
    fn test_hue_to_rgb() {
        assert_eq!(hue_to_rgb(0.0), (255, 0, 0));
        assert_eq!(hue_to_rgb(120.0), (0, 255, 0));
        assert_eq!(hue_to_rgb(240.0), (0, 0, 255));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(render(0, 10, 0).is_err());
    }
}
