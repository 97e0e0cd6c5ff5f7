//! Display front-end configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation and clipping switches for a [`Gdisp`](crate::Gdisp)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GdispConfig {
    /// Reject or clip geometry against the display bounds before dispatch
    ///
    /// When disabled, out-of-bounds geometry goes straight to the port and
    /// the result is whatever the hardware does.
    pub validation: bool,
    /// Also clip against the user clip rectangle set with
    /// [`Gdisp::set_clip`](crate::Gdisp::set_clip)
    pub clipping: bool,
}

impl Default for GdispConfig {
    fn default() -> Self {
        Self {
            validation: true,
            clipping: false,
        }
    }
}

impl GdispConfig {
    /// No checks at all; for ports that clip in hardware
    pub const fn unchecked() -> Self {
        Self {
            validation: false,
            clipping: false,
        }
    }

    /// Bounds validation plus user clip rectangle
    pub const fn clipped() -> Self {
        Self {
            validation: true,
            clipping: true,
        }
    }

    /// Check if any geometry check runs before dispatch
    pub const fn checks_bounds(&self) -> bool {
        self.validation || self.clipping
    }
}
