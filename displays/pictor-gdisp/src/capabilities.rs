//! Capability descriptor
//!
//! Records which optional primitives a display port implements in
//! hardware. Ports attach one as an associated constant, e.g.
//!
//! ```
//! use pictor_gdisp::Capabilities;
//!
//! const PANEL_CAPS: Capabilities = Capabilities {
//!     fills: true,
//!     control: true,
//!     ..Capabilities::NONE
//! };
//! assert!(PANEL_CAPS.fills && !PANEL_CAPS.lines);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hardware-accelerated primitives of a display port
///
/// Every flag left `false` is served by software emulation, except
/// `pixel_read` which has no emulation: without it `get_pixel_color` is
/// unavailable, and `vertical_scroll` is unavailable unless `scroll` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capabilities {
    /// Whole-screen clear
    pub clear: bool,
    /// Arbitrary lines
    pub lines: bool,
    /// Solid rectangle fills
    pub fills: bool,
    /// Bitmap blits
    pub blits: bool,
    /// Circle outlines
    pub circles: bool,
    /// Filled circles
    pub circle_fills: bool,
    /// Ellipse outlines
    pub ellipses: bool,
    /// Filled ellipses
    pub ellipse_fills: bool,
    /// Transparent-background glyphs
    pub text: bool,
    /// Filled-background glyphs
    pub text_fills: bool,
    /// Pixel readback
    pub pixel_read: bool,
    /// Vertical block scroll
    pub scroll: bool,
    /// Power, orientation, backlight and contrast control
    pub control: bool,
}

impl Capabilities {
    /// Only the mandatory primitives are available
    pub const NONE: Self = Self {
        clear: false,
        lines: false,
        fills: false,
        blits: false,
        circles: false,
        circle_fills: false,
        ellipses: false,
        ellipse_fills: false,
        text: false,
        text_fills: false,
        pixel_read: false,
        scroll: false,
        control: false,
    };

    /// Every optional primitive is accelerated
    pub const ALL: Self = Self {
        clear: true,
        lines: true,
        fills: true,
        blits: true,
        circles: true,
        circle_fills: true,
        ellipses: true,
        ellipse_fills: true,
        text: true,
        text_fills: true,
        pixel_read: true,
        scroll: true,
        control: true,
    };

    /// Check if `vertical_scroll` can be served at all
    pub const fn can_scroll(&self) -> bool {
        self.scroll || self.pixel_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }

    #[test]
    fn test_scroll_needs_readback_or_hardware() {
        assert!(!Capabilities::NONE.can_scroll());
        let readback = Capabilities {
            pixel_read: true,
            ..Capabilities::NONE
        };
        assert!(readback.can_scroll());
        let hardware = Capabilities {
            scroll: true,
            ..Capabilities::NONE
        };
        assert!(hardware.can_scroll());
    }
}
