//! Display port trait
//!
//! Defines the interface between the portable front-end and a
//! board/controller port.

use crate::capabilities::Capabilities;
use crate::font::Font;
use crate::types::{Coord, DisplayState, Orientation, PowerMode};

/// Display port
///
/// `init` and `draw_pixel` are mandatory. Every other method is optional and
/// is only called by [`Gdisp`](crate::Gdisp) when the matching flag in
/// [`CAPABILITIES`](Self::CAPABILITIES) is set; the default bodies do
/// nothing. Geometry reaching these methods has already been validated and
/// clipped when validation is enabled.
pub trait DisplayDriver {
    /// Native pixel color
    ///
    /// `Default` must be the zero color; it is returned for out-of-bounds
    /// pixel reads.
    type Color: Copy + PartialEq + Default;

    /// Primitives this port accelerates
    const CAPABILITIES: Capabilities;

    /// Bring up the panel
    ///
    /// Returns the initial state with native width and height.
    fn init(&mut self) -> DisplayState;

    /// Draw a single pixel
    fn draw_pixel(&mut self, x: Coord, y: Coord, color: Self::Color);

    /// Fill the whole display
    fn clear(&mut self, _color: Self::Color) {}

    /// Draw a line, endpoints inclusive
    fn draw_line(&mut self, _x0: Coord, _y0: Coord, _x1: Coord, _y1: Coord, _color: Self::Color) {}

    /// Fill a rectangle
    fn fill_area(&mut self, _x: Coord, _y: Coord, _cx: Coord, _cy: Coord, _color: Self::Color) {}

    /// Copy a bitmap into a rectangle
    ///
    /// `buffer` holds `cy` rows of exactly `cx` pixels each.
    fn blit_area(&mut self, _x: Coord, _y: Coord, _cx: Coord, _cy: Coord, _buffer: &[Self::Color]) {}

    /// Draw a circle outline
    fn draw_circle(&mut self, _x: Coord, _y: Coord, _radius: Coord, _color: Self::Color) {}

    /// Draw a filled circle
    fn fill_circle(&mut self, _x: Coord, _y: Coord, _radius: Coord, _color: Self::Color) {}

    /// Draw an ellipse outline with horizontal radius `a` and vertical radius `b`
    fn draw_ellipse(&mut self, _x: Coord, _y: Coord, _a: Coord, _b: Coord, _color: Self::Color) {}

    /// Draw a filled ellipse
    fn fill_ellipse(&mut self, _x: Coord, _y: Coord, _a: Coord, _b: Coord, _color: Self::Color) {}

    /// Draw a glyph, leaving background pixels untouched
    fn draw_char<F: Font + ?Sized>(
        &mut self,
        _x: Coord,
        _y: Coord,
        _c: char,
        _font: &F,
        _color: Self::Color,
    ) {
    }

    /// Draw a glyph cell, painting background pixels with `bgcolor`
    fn fill_char<F: Font + ?Sized>(
        &mut self,
        _x: Coord,
        _y: Coord,
        _c: char,
        _font: &F,
        _color: Self::Color,
        _bgcolor: Self::Color,
    ) {
    }

    /// Read back a pixel
    fn get_pixel_color(&mut self, _x: Coord, _y: Coord) -> Self::Color {
        Self::Color::default()
    }

    /// Scroll a rectangle vertically by `lines` (positive moves content up)
    ///
    /// `lines` is non-zero and `|lines| < cy`; exposed rows get `bgcolor`.
    fn vertical_scroll(
        &mut self,
        _x: Coord,
        _y: Coord,
        _cx: Coord,
        _cy: Coord,
        _lines: i32,
        _bgcolor: Self::Color,
    ) {
    }

    /// Run the power sequencing for a mode change
    ///
    /// Only called when the mode actually changes. Coming back from
    /// [`PowerMode::Sleep`] some controllers lose their configuration; such
    /// ports must re-run their init sequence here.
    fn set_power(&mut self, _from: PowerMode, _to: PowerMode) {}

    /// Reconfigure the scan direction for an orientation change
    ///
    /// Only called when the orientation actually changes. The front-end
    /// swaps the logical width and height itself.
    fn set_orientation(&mut self, _from: Orientation, _to: Orientation) {}

    /// Set the backlight level (0-100)
    fn set_backlight(&mut self, _percent: u8) {}

    /// Set the contrast level (0-100)
    fn set_contrast(&mut self, _percent: u8) {}

    /// Port-specific control code (at or above [`CONTROL_LLD`](crate::control::CONTROL_LLD))
    ///
    /// Unknown codes must be ignored.
    fn driver_control(&mut self, _code: u16, _value: u32) {}
}
