//! Display front-end
//!
//! [`Gdisp`] owns one port and the logical state of its panel. Every
//! drawing call is validated and clipped here, then handed to the port if
//! it accelerates the primitive, or to [`emulate`](crate::emulate)
//! otherwise.

use crate::config::GdispConfig;
use crate::control::Control;
use crate::driver::DisplayDriver;
use crate::emulate;
use crate::font::Font;
use crate::types::{Coord, DisplayId, DisplayState, Orientation, PowerMode, Rect};

/// One display instance
///
/// Not reentrant: callers serialize access themselves (single owning task
/// or an external lock).
pub struct Gdisp<D: DisplayDriver> {
    id: DisplayId,
    driver: D,
    state: DisplayState,
    config: GdispConfig,
    /// User clip rectangle, always inside the display bounds
    clip: Rect,
}

impl<D: DisplayDriver> Gdisp<D> {
    /// Initialize a port and wrap it
    pub fn new(id: DisplayId, mut driver: D, config: GdispConfig) -> Self {
        let state = driver.init();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Display {} initialized: {}x{} {}",
            id.0,
            state.width,
            state.height,
            state.orientation
        );

        Self {
            id,
            driver,
            state,
            config,
            clip: state.bounds(),
        }
    }

    /// Release the port
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Display identifier
    pub fn id(&self) -> DisplayId {
        self.id
    }

    /// Logical width
    pub fn width(&self) -> Coord {
        self.state.width
    }

    /// Logical height
    pub fn height(&self) -> Coord {
        self.state.height
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    /// Current power mode
    pub fn power_mode(&self) -> PowerMode {
        self.state.power
    }

    /// Current backlight level
    pub fn backlight(&self) -> u8 {
        self.state.backlight
    }

    /// Current contrast level
    pub fn contrast(&self) -> u8 {
        self.state.contrast
    }

    /// Full logical state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Validation settings
    pub fn config(&self) -> &GdispConfig {
        &self.config
    }

    /// The underlying port
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The underlying port, mutably
    ///
    /// Drawing through this bypasses validation.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    // ---- Clipping ----

    /// Restrict drawing to a rectangle
    ///
    /// Only honored when `clipping` is enabled. The rectangle is cut down to
    /// the display bounds; a rectangle outside the display blocks all
    /// drawing until the next [`reset_clip`](Self::reset_clip).
    pub fn set_clip(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord) {
        self.clip = self
            .state
            .bounds()
            .intersect(&Rect::new(x, y, cx, cy))
            .unwrap_or_default();
    }

    /// Allow drawing on the whole display again
    pub fn reset_clip(&mut self) {
        self.clip = self.state.bounds();
    }

    /// Current clip rectangle
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Area drawing is checked against
    fn visible_area(&self) -> Rect {
        if self.config.clipping {
            self.clip
        } else {
            self.state.bounds()
        }
    }

    fn is_visible(&self, x: Coord, y: Coord) -> bool {
        !self.config.checks_bounds() || self.visible_area().contains(x, y)
    }

    /// Clip an area to the visible region
    ///
    /// Returns `None` when nothing would be drawn. Degenerate sizes are
    /// rejected even without validation.
    fn clip_area(&self, x: Coord, y: Coord, cx: Coord, cy: Coord) -> Option<Rect> {
        let area = Rect::new(x, y, cx, cy);
        if area.is_empty() {
            return None;
        }
        if !self.config.checks_bounds() {
            return Some(area);
        }
        self.visible_area().intersect(&area)
    }

    /// Check if a shape's bounding box can touch the visible region
    fn may_touch(&self, bbox: Rect) -> bool {
        !self.config.checks_bounds() || self.visible_area().intersect(&bbox).is_some()
    }

    // ---- Primitives ----

    /// Draw a single pixel
    pub fn draw_pixel(&mut self, x: Coord, y: Coord, color: D::Color) {
        if self.is_visible(x, y) {
            self.driver.draw_pixel(x, y, color);
        }
    }

    /// Fill the whole display, ignoring the clip rectangle
    pub fn clear(&mut self, color: D::Color) {
        if D::CAPABILITIES.clear {
            self.driver.clear(color);
        } else {
            emulate::clear(self, color);
        }
    }

    /// Draw a line, endpoints inclusive
    pub fn draw_line(&mut self, x0: Coord, y0: Coord, x1: Coord, y1: Coord, color: D::Color) {
        if D::CAPABILITIES.lines {
            let bbox = Rect::new(
                x0.min(x1),
                y0.min(y1),
                x0.abs_diff(x1).saturating_add(1).min(Coord::MAX as u16) as Coord,
                y0.abs_diff(y1).saturating_add(1).min(Coord::MAX as u16) as Coord,
            );
            if self.may_touch(bbox) {
                self.driver.draw_line(x0, y0, x1, y1, color);
            }
        } else {
            emulate::draw_line(self, x0, y0, x1, y1, color);
        }
    }

    /// Fill a rectangle
    ///
    /// With validation, the part outside the visible region is cut off.
    pub fn fill_area(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, color: D::Color) {
        if let Some(area) = self.clip_area(x, y, cx, cy) {
            self.fill_unchecked(area, color);
        }
    }

    /// Fill an already validated area
    pub(crate) fn fill_unchecked(&mut self, area: Rect, color: D::Color) {
        if D::CAPABILITIES.fills {
            self.driver
                .fill_area(area.x, area.y, area.width, area.height, color);
        } else {
            emulate::fill_area(&mut self.driver, area, color);
        }
    }

    /// Draw a rectangle outline
    pub fn draw_box(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, color: D::Color) {
        if cx < 1 || cy < 1 {
            return;
        }
        // Edges past the end of the coordinate space are off-screen anyway
        let edge = |v: i32| Coord::try_from(v).ok();
        let right = edge(x as i32 + cx as i32 - 1);
        let bottom = edge(y as i32 + cy as i32 - 1);

        self.fill_area(x, y, cx, 1, color);
        if cy > 1 {
            if let Some(bottom) = bottom {
                self.fill_area(x, bottom, cx, 1, color);
            }
        }
        if cy > 2 {
            let Some(top) = edge(y as i32 + 1) else {
                return;
            };
            self.fill_area(x, top, 1, cy - 2, color);
            if let (true, Some(right)) = (cx > 1, right) {
                self.fill_area(right, top, 1, cy - 2, color);
            }
        }
    }

    /// Copy a bitmap of `cx` by `cy` pixels into the display
    ///
    /// `buffer` is read row by row with a stride of `cx`. A bitmap that does
    /// not fit horizontally is rejected outright because the rows cannot be
    /// re-strided; vertical overflow is clipped. Too short a buffer is a
    /// no-op.
    pub fn blit_area(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, buffer: &[D::Color]) {
        if cx < 1 || cy < 1 {
            return;
        }
        let stride = cx as usize;
        if buffer.len() < stride * cy as usize {
            return;
        }

        let (mut y, mut cy, mut skip) = (y as i32, cy as i32, 0i32);
        if self.config.checks_bounds() {
            let visible = self.visible_area();
            if visible.is_empty() || x < visible.x || x as i32 + cx as i32 > visible.right() {
                return;
            }
            if y < visible.y as i32 {
                skip = visible.y as i32 - y;
                y = visible.y as i32;
                cy -= skip;
            }
            cy = cy.min(visible.bottom() - y);
            if cy < 1 {
                return;
            }
        }

        let start = skip as usize * stride;
        let rows = &buffer[start..start + cy as usize * stride];
        let (y, cy) = (y as Coord, cy as Coord);
        if D::CAPABILITIES.blits {
            self.driver.blit_area(x, y, cx, cy, rows);
        } else {
            emulate::blit_area(&mut self.driver, x, y, cx, cy, rows);
        }
    }

    /// Draw a circle outline
    pub fn draw_circle(&mut self, x: Coord, y: Coord, radius: Coord, color: D::Color) {
        if radius < 1 {
            return;
        }
        if D::CAPABILITIES.circles {
            if self.may_touch(bounding_box(x, y, radius, radius)) {
                self.driver.draw_circle(x, y, radius, color);
            }
        } else {
            emulate::draw_circle(self, x, y, radius, color);
        }
    }

    /// Draw a filled circle
    pub fn fill_circle(&mut self, x: Coord, y: Coord, radius: Coord, color: D::Color) {
        if radius < 1 {
            return;
        }
        if D::CAPABILITIES.circle_fills {
            if self.may_touch(bounding_box(x, y, radius, radius)) {
                self.driver.fill_circle(x, y, radius, color);
            }
        } else {
            emulate::fill_circle(self, x, y, radius, color);
        }
    }

    /// Draw an ellipse outline with horizontal radius `a` and vertical radius `b`
    pub fn draw_ellipse(&mut self, x: Coord, y: Coord, a: Coord, b: Coord, color: D::Color) {
        if a < 1 || b < 1 {
            return;
        }
        if D::CAPABILITIES.ellipses {
            if self.may_touch(bounding_box(x, y, a, b)) {
                self.driver.draw_ellipse(x, y, a, b, color);
            }
        } else {
            emulate::draw_ellipse(self, x, y, a, b, color);
        }
    }

    /// Draw a filled ellipse
    pub fn fill_ellipse(&mut self, x: Coord, y: Coord, a: Coord, b: Coord, color: D::Color) {
        if a < 1 || b < 1 {
            return;
        }
        if D::CAPABILITIES.ellipse_fills {
            if self.may_touch(bounding_box(x, y, a, b)) {
                self.driver.fill_ellipse(x, y, a, b, color);
            }
        } else {
            emulate::fill_ellipse(self, x, y, a, b, color);
        }
    }

    /// Draw a character with a transparent background
    pub fn draw_char<F: Font + ?Sized>(
        &mut self,
        x: Coord,
        y: Coord,
        c: char,
        font: &F,
        color: D::Color,
    ) {
        if D::CAPABILITIES.text {
            if self.may_touch(glyph_box(x, y, c, font)) {
                self.driver.draw_char(x, y, c, font, color);
            }
        } else {
            emulate::draw_char(self, x, y, c, font, color);
        }
    }

    /// Draw a character cell, painting the background with `bgcolor`
    pub fn fill_char<F: Font + ?Sized>(
        &mut self,
        x: Coord,
        y: Coord,
        c: char,
        font: &F,
        color: D::Color,
        bgcolor: D::Color,
    ) {
        if D::CAPABILITIES.text_fills {
            if self.may_touch(glyph_box(x, y, c, font)) {
                self.driver.fill_char(x, y, c, font, color, bgcolor);
            }
        } else {
            emulate::fill_char(self, x, y, c, font, color, bgcolor);
        }
    }

    /// Draw a string with a transparent background
    pub fn draw_string<F: Font + ?Sized>(
        &mut self,
        x: Coord,
        y: Coord,
        text: &str,
        font: &F,
        color: D::Color,
    ) {
        let mut cursor = x as i32;
        for c in text.chars() {
            if cursor > Coord::MAX as i32 {
                break;
            }
            self.draw_char(cursor as Coord, y, c, font, color);
            cursor += font.advance(c) as i32;
        }
    }

    /// Draw a string on a solid background box
    ///
    /// The gaps between glyphs are painted with `bgcolor` too.
    pub fn fill_string<F: Font + ?Sized>(
        &mut self,
        x: Coord,
        y: Coord,
        text: &str,
        font: &F,
        color: D::Color,
        bgcolor: D::Color,
    ) {
        let spacing = font.spacing();
        let mut cursor = x as i32;
        let mut chars = text.chars().filter(|&c| font.glyph(c).is_some()).peekable();
        while let Some(c) = chars.next() {
            if cursor > Coord::MAX as i32 {
                break;
            }
            self.fill_char(cursor as Coord, y, c, font, color, bgcolor);
            cursor += font.advance(c) as i32;
            if spacing > 0 && chars.peek().is_some() && cursor - spacing as i32 <= Coord::MAX as i32 {
                self.fill_area(
                    (cursor - spacing as i32) as Coord,
                    y,
                    spacing,
                    font.height(),
                    bgcolor,
                );
            }
        }
    }

    /// Read back a pixel
    ///
    /// Only available on ports with `pixel_read`; calling it on any other
    /// port fails to compile. Out-of-bounds reads return the zero color when
    /// validation is enabled.
    pub fn get_pixel_color(&mut self, x: Coord, y: Coord) -> D::Color {
        const {
            assert!(
                D::CAPABILITIES.pixel_read,
                "display port does not support pixel readback"
            )
        };
        if self.config.checks_bounds() && !self.state.bounds().contains(x, y) {
            return D::Color::default();
        }
        self.driver.get_pixel_color(x, y)
    }

    /// Scroll part of the display vertically
    ///
    /// Positive `lines` moves content up, negative moves it down; exposed
    /// rows are filled with `bgcolor`. Scrolling by the full height or more
    /// is a plain fill. Needs either hardware scrolling or pixel readback;
    /// calling it on any other port fails to compile.
    pub fn vertical_scroll(
        &mut self,
        x: Coord,
        y: Coord,
        cx: Coord,
        cy: Coord,
        lines: i32,
        bgcolor: D::Color,
    ) {
        const {
            assert!(
                D::CAPABILITIES.can_scroll(),
                "display port supports neither scrolling nor pixel readback"
            )
        };
        let Some(area) = self.clip_area(x, y, cx, cy) else {
            return;
        };
        if lines == 0 {
            return;
        }
        if lines.unsigned_abs() >= area.height as u32 {
            self.fill_unchecked(area, bgcolor);
            return;
        }
        if D::CAPABILITIES.scroll {
            self.driver
                .vertical_scroll(area.x, area.y, area.width, area.height, lines, bgcolor);
        } else {
            emulate::vertical_scroll(self, area, lines, bgcolor);
        }
    }

    // ---- Control ----

    /// Apply a control request
    ///
    /// Requests matching the current state are no-ops. On ports without the
    /// `control` capability the whole channel is ignored.
    pub fn control(&mut self, control: Control) {
        if !D::CAPABILITIES.control {
            #[cfg(feature = "defmt")]
            defmt::trace!("Display {}: no control support, ignoring {}", self.id.0, control);
            return;
        }

        let next = self.state.transition(control);
        if next == self.state {
            if let Control::Driver { code, value } = control {
                self.driver.driver_control(code, value);
            }
            return;
        }

        match control {
            Control::Power(to) => self.driver.set_power(self.state.power, to),
            Control::Orientation(to) => self.driver.set_orientation(self.state.orientation, to),
            Control::Backlight(_) => self.driver.set_backlight(next.backlight),
            Control::Contrast(_) => self.driver.set_contrast(next.contrast),
            Control::Driver { .. } => {}
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Display {}: {} -> {}", self.id.0, control, next);

        let reoriented = next.orientation != self.state.orientation;
        self.state = next;
        if reoriented {
            self.clip = self.state.bounds();
        }
    }

    /// Apply a raw `(what, value)` control request
    ///
    /// Unrecognized codes and out-of-range values are ignored.
    pub fn control_raw(&mut self, what: u16, value: u32) {
        match Control::from_raw(what, value) {
            Some(control) => self.control(control),
            None => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Display {}: ignoring control {}={}", self.id.0, what, value);
            }
        }
    }
}

/// Bounding box of a shape centred on (`x`, `y`)
fn bounding_box(x: Coord, y: Coord, rx: Coord, ry: Coord) -> Rect {
    let left = (x as i32 - rx as i32).max(Coord::MIN as i32);
    let top = (y as i32 - ry as i32).max(Coord::MIN as i32);
    let width = (2 * rx as i32 + 1).min(Coord::MAX as i32);
    let height = (2 * ry as i32 + 1).min(Coord::MAX as i32);
    Rect::new(left as Coord, top as Coord, width as Coord, height as Coord)
}

/// Cell of a glyph drawn at (`x`, `y`); empty for unknown characters
fn glyph_box<F: Font + ?Sized>(x: Coord, y: Coord, c: char, font: &F) -> Rect {
    let width = font.glyph(c).map(|g| g.width as Coord).unwrap_or(0);
    Rect::new(x, y, width, font.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::control::{CONTROL_BACKLIGHT, CONTROL_ORIENTATION, CONTROL_POWER};
    use crate::font::test_font::TinyFont;
    use crate::framebuffer::{Accelerated, Emulated, FrameBuffer};
    use proptest::prelude::*;

    /// Port that counts every call it receives
    #[derive(Default)]
    struct Recorder<const CONTROL: bool> {
        pixels: u32,
        fills: u32,
        last_fill: Option<Rect>,
        power_calls: u32,
        orientation_calls: u32,
        backlight_calls: u32,
        driver_calls: u32,
        reads: u32,
    }

    impl<const CONTROL: bool> DisplayDriver for Recorder<CONTROL> {
        type Color = u8;

        const CAPABILITIES: Capabilities = Capabilities {
            fills: true,
            pixel_read: true,
            control: CONTROL,
            ..Capabilities::NONE
        };

        fn init(&mut self) -> DisplayState {
            DisplayState::new(240, 320)
        }

        fn draw_pixel(&mut self, _x: Coord, _y: Coord, _color: u8) {
            self.pixels += 1;
        }

        fn fill_area(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, _color: u8) {
            self.fills += 1;
            self.last_fill = Some(Rect::new(x, y, cx, cy));
        }

        fn get_pixel_color(&mut self, _x: Coord, _y: Coord) -> u8 {
            self.reads += 1;
            9
        }

        fn set_power(&mut self, _from: PowerMode, _to: PowerMode) {
            self.power_calls += 1;
        }

        fn set_orientation(&mut self, _from: Orientation, _to: Orientation) {
            self.orientation_calls += 1;
        }

        fn set_backlight(&mut self, _percent: u8) {
            self.backlight_calls += 1;
        }

        fn driver_control(&mut self, _code: u16, _value: u32) {
            self.driver_calls += 1;
        }
    }

    type Small = FrameBuffer<u8, { 64 * 48 }, Emulated>;
    type SmallFast = FrameBuffer<u8, { 64 * 48 }, Accelerated>;

    fn small(config: GdispConfig) -> Gdisp<Small> {
        Gdisp::new(DisplayId(0), Small::new(64, 48).unwrap(), config)
    }

    fn small_fast(config: GdispConfig) -> Gdisp<SmallFast> {
        Gdisp::new(DisplayId(1), SmallFast::new(64, 48).unwrap(), config)
    }

    fn snapshot<P: crate::framebuffer::Profile>(
        gd: &Gdisp<FrameBuffer<u8, { 64 * 48 }, P>>,
    ) -> [u8; 64 * 48] {
        let mut out = [0u8; 64 * 48];
        out.copy_from_slice(gd.driver().pixels());
        out
    }

    #[test]
    fn test_fill_clipped_at_display_edge() {
        // 320x240 panel, fill hangs 30px past both edges
        type Panel = FrameBuffer<u8, { 320 * 240 }, Emulated>;
        let mut gd = Gdisp::new(
            DisplayId(0),
            Panel::new(320, 240).unwrap(),
            GdispConfig::default(),
        );
        gd.fill_area(300, 200, 50, 50, 1);

        let fb = gd.driver();
        for y in 0..240 {
            for x in 0..320 {
                let expected = if x >= 300 && y >= 200 { 1 } else { 0 };
                assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(fb.count(1), 20 * 40);
    }

    #[test]
    fn test_hardware_fill_receives_clipped_area() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.fill_area(230, 310, 50, 50, 1);
        assert_eq!(gd.driver().fills, 1);
        assert_eq!(gd.driver().last_fill, Some(Rect::new(230, 310, 10, 10)));
        assert_eq!(gd.driver().pixels, 0);
    }

    #[test]
    fn test_fill_outside_is_noop() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.fill_area(240, 0, 10, 10, 1);
        gd.fill_area(-10, 0, 10, 10, 1);
        gd.fill_area(5, 5, 0, 10, 1);
        assert_eq!(gd.driver().fills, 0);
    }

    #[test]
    fn test_unchecked_passes_geometry_through() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::unchecked());
        gd.fill_area(230, 310, 50, 50, 1);
        assert_eq!(gd.driver().last_fill, Some(Rect::new(230, 310, 50, 50)));
    }

    #[test]
    fn test_pixel_validation() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.draw_pixel(239, 319, 1);
        gd.draw_pixel(240, 0, 1);
        gd.draw_pixel(0, -1, 1);
        assert_eq!(gd.driver().pixels, 1);
    }

    #[test]
    fn test_pixel_read_out_of_bounds_is_zero() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        assert_eq!(gd.get_pixel_color(10, 10), 9);
        assert_eq!(gd.get_pixel_color(240, 10), 0);
        assert_eq!(gd.get_pixel_color(-1, 10), 0);
        assert_eq!(gd.driver().reads, 1);
    }

    #[test]
    fn test_clip_rectangle() {
        let mut gd = small(GdispConfig::clipped());
        gd.set_clip(10, 10, 5, 5);
        gd.fill_area(0, 0, 64, 48, 3);
        assert_eq!(gd.driver().count(3), 25);
        assert_eq!(gd.driver().pixel(10, 10), Some(3));
        assert_eq!(gd.driver().pixel(15, 10), Some(0));

        // Clear ignores the clip
        gd.clear(4);
        assert_eq!(gd.driver().count(4), 64 * 48);

        gd.reset_clip();
        gd.fill_area(0, 0, 64, 48, 5);
        assert_eq!(gd.driver().count(5), 64 * 48);
    }

    #[test]
    fn test_clip_ignored_without_clipping() {
        let mut gd = small(GdispConfig::default());
        gd.set_clip(10, 10, 5, 5);
        gd.fill_area(0, 0, 64, 48, 3);
        assert_eq!(gd.driver().count(3), 64 * 48);
    }

    #[test]
    fn test_blit_horizontal_overflow_rejected() {
        let mut gd = small(GdispConfig::default());
        let bitmap = [7u8; 10 * 4];
        gd.blit_area(60, 0, 10, 4, &bitmap);
        assert_eq!(gd.driver().count(7), 0);
        gd.blit_area(-1, 0, 10, 4, &bitmap);
        assert_eq!(gd.driver().count(7), 0);
    }

    #[test]
    fn test_blit_vertical_overflow_clipped() {
        let mut gd = small(GdispConfig::default());
        // Row r of the bitmap holds value r + 1
        let mut bitmap = [0u8; 4 * 6];
        for (i, px) in bitmap.iter_mut().enumerate() {
            *px = (i / 4) as u8 + 1;
        }

        gd.blit_area(0, 45, 4, 6, &bitmap);
        assert_eq!(gd.driver().pixel(0, 45), Some(1));
        assert_eq!(gd.driver().pixel(3, 47), Some(3));

        gd.blit_area(10, -2, 4, 6, &bitmap);
        // Rows 0 and 1 fall above the display
        assert_eq!(gd.driver().pixel(10, 0), Some(3));
        assert_eq!(gd.driver().pixel(13, 3), Some(6));
        assert_eq!(gd.driver().pixel(10, 4), Some(0));
    }

    #[test]
    fn test_blit_short_buffer_is_noop() {
        let mut gd = small(GdispConfig::default());
        gd.blit_area(0, 0, 4, 4, &[1u8; 15]);
        assert_eq!(gd.driver().count(1), 0);
    }

    #[test]
    fn test_scroll_beyond_height_is_fill() {
        let mut scrolled = small(GdispConfig::default());
        let mut filled = small(GdispConfig::default());
        for gd in [&mut scrolled, &mut filled] {
            gd.draw_line(0, 0, 63, 47, 2);
            gd.fill_circle(30, 20, 8, 3);
        }

        scrolled.vertical_scroll(0, 0, 40, 30, 35, 9);
        filled.fill_area(0, 0, 40, 30, 9);
        assert_eq!(snapshot(&scrolled), snapshot(&filled));

        scrolled.vertical_scroll(0, 0, 40, 30, -30, 8);
        filled.fill_area(0, 0, 40, 30, 8);
        assert_eq!(snapshot(&scrolled), snapshot(&filled));
    }

    #[test]
    fn test_draw_box_outline() {
        let mut gd = small(GdispConfig::default());
        gd.draw_box(2, 3, 5, 4, 1);
        assert_eq!(gd.driver().count(1), 14);
        assert_eq!(gd.driver().pixel(2, 3), Some(1));
        assert_eq!(gd.driver().pixel(6, 6), Some(1));
        assert_eq!(gd.driver().pixel(3, 4), Some(0));

        gd.draw_box(20, 20, 1, 1, 2);
        assert_eq!(gd.driver().count(2), 1);
    }

    #[test]
    fn test_draw_box_at_coordinate_limit() {
        let mut gd = small(GdispConfig::default());
        gd.draw_box(0, Coord::MAX, 5, 5, 1);
        gd.draw_box(Coord::MAX - 1, 0, 5, 5, 1);
        gd.draw_box(Coord::MAX, Coord::MAX, Coord::MAX, Coord::MAX, 1);
        assert_eq!(gd.driver().count(1), 0);

        let mut gd = small(GdispConfig::unchecked());
        gd.draw_box(Coord::MAX - 2, Coord::MAX - 2, 10, 10, 1);
        assert_eq!(gd.driver().count(1), 0);
    }

    #[test]
    fn test_draw_string_advances() {
        let mut gd = small(GdispConfig::default());
        gd.draw_string(0, 0, "IL", &TinyFont, 1);
        // 'I' top bar and 'L' bottom bar
        assert_eq!(gd.driver().pixel(0, 0), Some(1));
        assert_eq!(gd.driver().pixel(2, 0), Some(1));
        assert_eq!(gd.driver().pixel(3, 0), Some(0));
        assert_eq!(gd.driver().pixel(4, 4), Some(1));
        assert_eq!(gd.driver().pixel(6, 4), Some(1));
    }

    #[test]
    fn test_fill_string_paints_gaps() {
        let mut gd = small(GdispConfig::default());
        gd.fill_string(0, 0, "AI", &TinyFont, 1, 2);
        let total = 7 * 5;
        assert_eq!(gd.driver().count(1) + gd.driver().count(2), total);
        assert_eq!(gd.driver().pixel(3, 2), Some(2));
        assert_eq!(gd.driver().pixel(7, 0), Some(0));
    }

    // ---- Control ----

    #[test]
    fn test_power_same_mode_is_noop() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.control(Control::Power(PowerMode::Sleep));
        assert_eq!(gd.driver().power_calls, 1);
        assert_eq!(gd.power_mode(), PowerMode::Sleep);

        gd.control(Control::Power(PowerMode::Sleep));
        assert_eq!(gd.driver().power_calls, 1);

        gd.control(Control::Power(PowerMode::On));
        assert_eq!(gd.driver().power_calls, 2);
        assert_eq!(gd.power_mode(), PowerMode::On);
    }

    #[test]
    fn test_orientation_idempotent_and_reversible() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        assert_eq!((gd.width(), gd.height()), (240, 320));

        gd.control(Control::Orientation(Orientation::Landscape));
        assert_eq!((gd.width(), gd.height()), (320, 240));
        assert_eq!(gd.driver().orientation_calls, 1);

        gd.control(Control::Orientation(Orientation::Landscape));
        assert_eq!((gd.width(), gd.height()), (320, 240));
        assert_eq!(gd.driver().orientation_calls, 1);

        gd.control(Control::Orientation(Orientation::Portrait));
        assert_eq!((gd.width(), gd.height()), (240, 320));
        assert_eq!(gd.driver().orientation_calls, 2);
    }

    #[test]
    fn test_orientation_resets_clip() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::clipped());
        gd.set_clip(0, 0, 10, 10);
        gd.control(Control::Orientation(Orientation::Landscape));
        assert_eq!(gd.clip(), Rect::new(0, 0, 320, 240));
    }

    #[test]
    fn test_control_raw() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.control_raw(CONTROL_POWER, 0);
        assert_eq!(gd.power_mode(), PowerMode::Off);

        gd.control_raw(CONTROL_ORIENTATION, 3);
        assert_eq!(gd.orientation(), Orientation::LandscapeInverted);

        gd.control_raw(CONTROL_BACKLIGHT, 40);
        gd.control_raw(CONTROL_BACKLIGHT, 40);
        assert_eq!(gd.backlight(), 40);
        assert_eq!(gd.driver().backlight_calls, 1);

        // Unrecognized codes and values change nothing
        let before = *gd.state();
        gd.control_raw(CONTROL_POWER, 17);
        gd.control_raw(55, 1);
        assert_eq!(*gd.state(), before);
        assert_eq!(gd.driver().power_calls, 1);
    }

    #[test]
    fn test_driver_specific_control_forwarded() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<true>::default(), GdispConfig::default());
        gd.control_raw(1000, 5);
        gd.control_raw(1000, 5);
        assert_eq!(gd.driver().driver_calls, 2);
    }

    #[test]
    fn test_control_ignored_without_capability() {
        let mut gd = Gdisp::new(DisplayId(0), Recorder::<false>::default(), GdispConfig::default());
        gd.control(Control::Power(PowerMode::Off));
        gd.control(Control::Orientation(Orientation::Landscape));
        assert_eq!(gd.power_mode(), PowerMode::On);
        assert_eq!((gd.width(), gd.height()), (240, 320));
        assert_eq!(gd.driver().power_calls, 0);
        assert_eq!(gd.driver().orientation_calls, 0);
    }

    // ---- Properties ----

    fn any_area() -> impl Strategy<Value = (Coord, Coord, Coord, Coord)> {
        (-80i16..140, -80i16..120, 0i16..100, 0i16..100)
    }

    proptest! {
        #[test]
        fn test_outside_areas_leave_buffer_unchanged((x, y, cx, cy) in any_area()) {
            let area = Rect::new(x, y, cx, cy);
            prop_assume!(Rect::new(0, 0, 64, 48).intersect(&area).is_none());

            let mut gd = small(GdispConfig::default());
            gd.fill_area(x, y, cx, cy, 1);
            gd.vertical_scroll(x, y, cx, cy, 3, 2);
            let bitmap = [5u8; 100 * 100];
            gd.blit_area(x, y, cx, cy, &bitmap);
            prop_assert_eq!(gd.driver().count(0), 64 * 48);
        }

        #[test]
        fn test_partial_fill_matches_reference_clip((x, y, cx, cy) in any_area()) {
            let mut gd = small(GdispConfig::default());
            gd.fill_area(x, y, cx, cy, 1);

            let area = Rect::new(x, y, cx, cy);
            for py in 0..48 {
                for px in 0..64 {
                    let expected = u8::from(area.contains(px, py));
                    prop_assert_eq!(gd.driver().pixel(px, py), Some(expected));
                }
            }
        }

        #[test]
        fn test_emulation_matches_acceleration(
            (x, y, cx, cy) in any_area(),
            lines in -60i32..60,
            (x0, y0, x1, y1) in (-20i16..80, -20i16..70, -20i16..80, -20i16..70),
            r in 0i16..40,
        ) {
            let mut slow = small(GdispConfig::default());
            let mut fast = small_fast(GdispConfig::default());

            let mut bitmap = [0u8; 100 * 100];
            for (i, px) in bitmap.iter_mut().enumerate() {
                *px = (i % 251) as u8;
            }

            slow.clear(4);
            fast.clear(4);
            slow.draw_line(x0, y0, x1, y1, 6);
            fast.draw_line(x0, y0, x1, y1, 6);
            slow.fill_circle(x0, y1, r, 7);
            fast.fill_circle(x0, y1, r, 7);
            slow.fill_area(x, y, cx, cy, 1);
            fast.fill_area(x, y, cx, cy, 1);
            slow.blit_area(y, x, cy, cx, &bitmap);
            fast.blit_area(y, x, cy, cx, &bitmap);
            slow.vertical_scroll(x, y, cx, cy, lines, 2);
            fast.vertical_scroll(x, y, cx, cy, lines, 2);

            prop_assert_eq!(snapshot(&slow), snapshot(&fast));
        }
    }
}
