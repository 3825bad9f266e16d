//! LCD protocol definitions and encoding.
//!
//! Protocol structure:
//! - Command frames are 6 bytes; the opcode is always the last byte
//! - Operands are packed most-significant-first into bytes 0..5
//! - Orientation frames carry 5 extra bytes (11 total)
//! - Bitmap payloads follow their frame directly on the stream

use crate::Orientation;

/// Length of a standard command frame.
pub const FRAME_LEN: usize = 6;

/// Length of the orientation frame.
pub const ORIENTATION_FRAME_LEN: usize = 11;

/// Largest coordinate a packed field can carry (10 bits).
pub const MAX_COORD: u16 = 0x3FF;

/// Bias added to the orientation value on the wire.
const ORIENTATION_BIAS: u8 = 100;

/// LCD command opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Reboots the panel controller.
    Reset = 101,
    /// Clears the display to white.
    Clear = 102,
    /// Fills the display with black.
    ToBlack = 103,
    /// Turns the backlight off.
    ScreenOff = 108,
    /// Turns the backlight on.
    ScreenOn = 109,
    /// Sets the backlight level.
    SetBrightness = 110,
    /// Sets the scan-out orientation.
    SetOrientation = 121,
    /// Opens a window for a raw RGB565 payload.
    DisplayBitmap = 197,
    /// Identity query sent during the handshake.
    Hello = 69,
}

/// Builds a frame with no operands.
pub fn command0(cmd: Command) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[5] = cmd as u8;
    frame
}

/// Builds a frame carrying a single 10-bit value.
pub fn command1(cmd: Command, x: u16) -> [u8; FRAME_LEN] {
    debug_assert!(x <= MAX_COORD);
    let x = x & MAX_COORD;
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = (x >> 2) as u8;
    frame[1] = ((x & 3) << 6) as u8;
    frame[5] = cmd as u8;
    frame
}

/// Builds a frame carrying a window `(x0, y0)..=(x1, y1)`, 10 bits per field.
pub fn command4(cmd: Command, x0: u16, y0: u16, x1: u16, y1: u16) -> [u8; FRAME_LEN] {
    debug_assert!(x0 <= MAX_COORD && y0 <= MAX_COORD && x1 <= MAX_COORD && y1 <= MAX_COORD);
    let (x0, y0, x1, y1) = (x0 & MAX_COORD, y0 & MAX_COORD, x1 & MAX_COORD, y1 & MAX_COORD);
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = (x0 >> 2) as u8;
    frame[1] = (((x0 & 3) << 6) | (y0 >> 4)) as u8;
    frame[2] = (((y0 & 15) << 4) | (x1 >> 6)) as u8;
    frame[3] = (((x1 & 63) << 2) | (y1 >> 8)) as u8;
    frame[4] = (y1 & 255) as u8;
    frame[5] = cmd as u8;
    frame
}

/// Builds the handshake frame: six copies of the hello opcode.
pub fn hello() -> [u8; FRAME_LEN] {
    [Command::Hello as u8; FRAME_LEN]
}

/// Builds the orientation frame.
///
/// `width` and `height` are the panel's native dimensions, sent big-endian.
pub fn orientation_frame(
    orientation: Orientation,
    width: u16,
    height: u16,
) -> [u8; ORIENTATION_FRAME_LEN] {
    let mut frame = [0u8; ORIENTATION_FRAME_LEN];
    frame[..FRAME_LEN].copy_from_slice(&command0(Command::SetOrientation));
    frame[6] = orientation.value() + ORIENTATION_BIAS;
    frame[7..9].copy_from_slice(&width.to_be_bytes());
    frame[9..11].copy_from_slice(&height.to_be_bytes());
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack4(frame: &[u8; FRAME_LEN]) -> (u16, u16, u16, u16) {
        let b: Vec<u16> = frame.iter().map(|&b| b as u16).collect();
        let x0 = (b[0] << 2) | (b[1] >> 6);
        let y0 = ((b[1] & 63) << 4) | (b[2] >> 4);
        let x1 = ((b[2] & 15) << 6) | (b[3] >> 2);
        let y1 = ((b[3] & 3) << 8) | b[4];
        (x0, y0, x1, y1)
    }

    #[test]
    fn test_clear_frame() {
        assert_eq!(command0(Command::Clear), [0, 0, 0, 0, 0, 102]);
    }

    #[test]
    fn test_opcodes() {
        assert_eq!(Command::Reset as u8, 101);
        assert_eq!(Command::ToBlack as u8, 103);
        assert_eq!(Command::ScreenOff as u8, 108);
        assert_eq!(Command::ScreenOn as u8, 109);
        assert_eq!(Command::SetBrightness as u8, 110);
        assert_eq!(Command::SetOrientation as u8, 121);
        assert_eq!(Command::DisplayBitmap as u8, 197);
    }

    #[test]
    fn test_hello_frame() {
        assert_eq!(hello(), [69; 6]);
    }

    #[test]
    fn test_command1_packing() {
        let frame = command1(Command::SetBrightness, 128);
        assert_eq!(frame, [32, 0, 0, 0, 0, 110]);

        let frame = command1(Command::SetBrightness, 255);
        assert_eq!(frame[0], 63);
        assert_eq!(frame[1], 0xC0);
    }

    #[test]
    fn test_command4_full_panel_window() {
        let frame = command4(Command::DisplayBitmap, 0, 0, 319, 479);
        assert_eq!(frame[5], 197);
        assert_eq!(unpack4(&frame), (0, 0, 319, 479));
    }

    #[test]
    fn test_command4_unpacks() {
        for coords in [
            (0, 0, 319, 479),
            (12, 34, 599, 1023),
            (1023, 1023, 1023, 1023),
            (300, 0, 319, 49),
        ] {
            let (x0, y0, x1, y1) = coords;
            let frame = command4(Command::DisplayBitmap, x0, y0, x1, y1);
            assert_eq!(unpack4(&frame), coords);
        }
    }

    #[test]
    fn test_orientation_frame() {
        for orientation in Orientation::ALL {
            let frame = orientation_frame(orientation, 320, 480);
            assert_eq!(frame.len(), ORIENTATION_FRAME_LEN);
            assert_eq!(&frame[..5], &[0, 0, 0, 0, 0]);
            assert_eq!(frame[5], 121);
            assert_eq!(frame[6], orientation.value() + 100);
            assert_eq!(&frame[7..9], &[0x01, 0x40]);
            assert_eq!(&frame[9..11], &[0x01, 0xE0]);
        }
    }
}
