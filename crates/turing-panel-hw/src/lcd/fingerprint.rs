//! Identity responses of known panel hardware.

/// Length of the identity response to the hello frame.
pub const IDENTITY_LEN: usize = 6;

/// Panel model and native geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelModel {
    /// Human-readable model name.
    pub name: &'static str,
    /// Native width in pixels.
    pub width: u16,
    /// Native height in pixels.
    pub height: u16,
}

/// A known identity response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    /// Bytes the panel answers the hello frame with.
    pub response: [u8; IDENTITY_LEN],
    pub model: PanelModel,
}

/// Known panels, matched in order.
pub static FINGERPRINTS: [Fingerprint; 4] = [
    Fingerprint {
        response: [0x00; IDENTITY_LEN],
        model: PanelModel {
            name: "Turing 3.5",
            width: 320,
            height: 480,
        },
    },
    Fingerprint {
        response: [0x01; IDENTITY_LEN],
        model: PanelModel {
            name: "USB Monitor 3.5",
            width: 320,
            height: 480,
        },
    },
    Fingerprint {
        response: [0x02; IDENTITY_LEN],
        model: PanelModel {
            name: "USB Monitor 5",
            width: 480,
            height: 800,
        },
    },
    Fingerprint {
        response: [0x03; IDENTITY_LEN],
        model: PanelModel {
            name: "USB Monitor 7",
            width: 600,
            height: 1024,
        },
    },
];

/// Model assumed when the identity response is not in the table.
pub static DEFAULT_MODEL: PanelModel = PanelModel {
    name: "USB Monitor 3.5",
    width: 320,
    height: 480,
};

/// Looks up a response in the fingerprint table.
pub fn lookup(response: &[u8]) -> Option<&'static PanelModel> {
    FINGERPRINTS
        .iter()
        .find(|fp| fp.response.as_slice() == response)
        .map(|fp| &fp.model)
}

/// Looks up a response, falling back to [`DEFAULT_MODEL`].
pub fn identify(response: &[u8]) -> &'static PanelModel {
    lookup(response).unwrap_or(&DEFAULT_MODEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_responses() {
        let fp = identify(&[0; 6]);
        assert_eq!(fp.name, "Turing 3.5");
        assert_eq!((fp.width, fp.height), (320, 480));

        let fp = identify(&[2; 6]);
        assert_eq!((fp.width, fp.height), (480, 800));

        let fp = identify(&[3; 6]);
        assert_eq!((fp.width, fp.height), (600, 1024));
    }

    #[test]
    fn test_unknown_response_falls_back() {
        assert!(lookup(&[1, 2, 3, 4, 5, 6]).is_none());
        let fp = identify(&[1, 2, 3, 4, 5, 6]);
        assert_eq!((fp.width, fp.height), (320, 480));
    }

    #[test]
    fn test_partial_match_is_not_a_match() {
        assert!(lookup(&[2, 2, 2, 2, 2]).is_none());
        assert!(lookup(&[2, 2, 2, 2, 2, 3]).is_none());
    }
}
