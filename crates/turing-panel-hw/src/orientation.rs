//! Display orientation support.
//!
//! The panel rotates its own scan-out; the host only sends the orientation
//! code. Panel width/height are always reported in the native (portrait)
//! geometry regardless of the orientation in effect.

use crate::{Error, Result};
use std::str::FromStr;

/// Display orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Native portrait.
    #[default]
    Portrait = 0,
    /// Portrait upside-down.
    ReversePortrait = 1,
    /// Landscape.
    Landscape = 2,
    /// Landscape upside-down.
    ReverseLandscape = 3,
}

impl Orientation {
    /// All orientations in wire order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Portrait,
        Orientation::ReversePortrait,
        Orientation::Landscape,
        Orientation::ReverseLandscape,
    ];

    /// Returns the protocol value (before the +100 bias applied on the wire).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns true if this is a landscape orientation.
    pub fn is_landscape(&self) -> bool {
        matches!(
            self,
            Orientation::Landscape | Orientation::ReverseLandscape
        )
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            "reverse-portrait" | "reverse_portrait" => Ok(Orientation::ReversePortrait),
            "reverse-landscape" | "reverse_landscape" => Ok(Orientation::ReverseLandscape),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::ReversePortrait => write!(f, "reverse-portrait"),
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::ReverseLandscape => write!(f, "reverse-landscape"),
        }
    }
}
