//! LCD panel module.
//!
//! Provides control over Turing-style RGB565 panels via USB serial.

mod device;
mod display;
mod panel;

pub mod fingerprint;
pub mod pixels;
pub mod protocol;

pub use device::{absolute_brightness, RevAPanel, MAX_BRIGHTNESS};
pub use display::{display_image, plan_transfer, Rect, Transfer};
pub use fingerprint::{Fingerprint, PanelModel};
pub use panel::{open, Panel, Revision};
pub use pixels::{convert_region, rgb888_to_rgb565, PixelBuffer};
pub use protocol::Command;
