//! In-memory display port
//!
//! A [`FrameBuffer`] is a complete port backed by a pixel array. The
//! [`Profile`] parameter picks what it claims to accelerate, so the same
//! panel can be driven through the hardware paths ([`Accelerated`]) or
//! through pure emulation ([`Emulated`]). Both must produce identical
//! pixels, which makes it the reference for testing the emulation layer.
//!
//! Pixels are stored in native (portrait) order; orientation changes only
//! remap logical coordinates.

use core::marker::PhantomData;
use core::ops::Range;

use crate::capabilities::Capabilities;
use crate::driver::DisplayDriver;
use crate::types::{Coord, DisplayState, Orientation, PowerMode};

/// Capability profile of a [`FrameBuffer`]
pub trait Profile {
    const CAPABILITIES: Capabilities;
}

/// Accelerates clears, fills, blits and scrolling
pub struct Accelerated;

/// Only raw pixels; everything else is emulated
pub struct Emulated;

impl Profile for Accelerated {
    const CAPABILITIES: Capabilities = Capabilities {
        clear: true,
        fills: true,
        blits: true,
        pixel_read: true,
        scroll: true,
        control: true,
        ..Capabilities::NONE
    };
}

impl Profile for Emulated {
    const CAPABILITIES: Capabilities = Capabilities {
        pixel_read: true,
        control: true,
        ..Capabilities::NONE
    };
}

/// Pixel-array display of up to `N` pixels
pub struct FrameBuffer<C, const N: usize, P = Accelerated> {
    native_width: Coord,
    native_height: Coord,
    orientation: Orientation,
    power: PowerMode,
    backlight: u8,
    contrast: u8,
    pixels: [C; N],
    _profile: PhantomData<P>,
}

impl<C: Copy + PartialEq + Default, const N: usize, P: Profile> FrameBuffer<C, N, P> {
    /// Create a blank panel of `width` by `height` native pixels
    ///
    /// Returns `None` if the panel does not fit in `N` pixels.
    pub fn new(width: Coord, height: Coord) -> Option<Self> {
        if width < 1 || height < 1 || width as usize * height as usize > N {
            return None;
        }
        Some(Self {
            native_width: width,
            native_height: height,
            orientation: Orientation::Portrait,
            power: PowerMode::On,
            backlight: 100,
            contrast: 50,
            pixels: [C::default(); N],
            _profile: PhantomData,
        })
    }

    /// Logical width and height for the current orientation
    fn logical_size(&self) -> (i32, i32) {
        let (w, h) = (self.native_width as i32, self.native_height as i32);
        if self.orientation.is_landscape() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Map a logical coordinate to its slot in the native array
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (lw, lh) = self.logical_size();
        if x < 0 || y < 0 || x >= lw || y >= lh {
            return None;
        }
        let (nw, nh) = (self.native_width as i32, self.native_height as i32);
        let (nx, ny) = match self.orientation {
            Orientation::Portrait => (x, y),
            Orientation::Landscape => (nw - 1 - y, x),
            Orientation::PortraitInverted => (nw - 1 - x, nh - 1 - y),
            Orientation::LandscapeInverted => (y, nh - 1 - x),
        };
        Some((ny * nw + nx) as usize)
    }

    /// Pixel at a logical coordinate
    pub fn pixel(&self, x: Coord, y: Coord) -> Option<C> {
        self.index(x as i32, y as i32).map(|i| self.pixels[i])
    }

    /// All pixels in native row-major order
    pub fn pixels(&self) -> &[C] {
        &self.pixels[..self.native_width as usize * self.native_height as usize]
    }

    /// Number of pixels holding `color`
    pub fn count(&self, color: C) -> usize {
        self.pixels().iter().filter(|&&c| c == color).count()
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current power mode
    pub fn power_mode(&self) -> PowerMode {
        self.power
    }

    /// Last backlight level set
    pub fn backlight(&self) -> u8 {
        self.backlight
    }

    /// Last contrast level set
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    fn set(&mut self, x: i32, y: i32, color: C) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn get(&self, x: i32, y: i32) -> C {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or_default()
    }

    /// Copy row `src` onto row `dst`, or blank it if `src` left the window
    fn scroll_row(&mut self, x: i32, cx: i32, dst: i32, src: i32, window: Range<i32>, bgcolor: C) {
        let inside = window.contains(&src);
        for col in x..x + cx {
            let color = if inside { self.get(col, src) } else { bgcolor };
            self.set(col, dst, color);
        }
    }
}

impl<C: Copy + PartialEq + Default, const N: usize, P: Profile> DisplayDriver
    for FrameBuffer<C, N, P>
{
    type Color = C;

    const CAPABILITIES: Capabilities = P::CAPABILITIES;

    fn init(&mut self) -> DisplayState {
        self.orientation = Orientation::Portrait;
        self.power = PowerMode::On;
        DisplayState::new(self.native_width, self.native_height)
    }

    fn draw_pixel(&mut self, x: Coord, y: Coord, color: C) {
        self.set(x as i32, y as i32, color);
    }

    fn clear(&mut self, color: C) {
        let len = self.native_width as usize * self.native_height as usize;
        self.pixels[..len].fill(color);
    }

    fn fill_area(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, color: C) {
        for row in y as i32..y as i32 + cy as i32 {
            for col in x as i32..x as i32 + cx as i32 {
                self.set(col, row, color);
            }
        }
    }

    fn blit_area(&mut self, x: Coord, y: Coord, cx: Coord, cy: Coord, buffer: &[C]) {
        if cx < 1 || cy < 1 {
            return;
        }
        for (row, line) in buffer.chunks_exact(cx as usize).take(cy as usize).enumerate() {
            for (col, &color) in line.iter().enumerate() {
                self.set(x as i32 + col as i32, y as i32 + row as i32, color);
            }
        }
    }

    fn get_pixel_color(&mut self, x: Coord, y: Coord) -> C {
        self.get(x as i32, y as i32)
    }

    fn vertical_scroll(
        &mut self,
        x: Coord,
        y: Coord,
        cx: Coord,
        cy: Coord,
        lines: i32,
        bgcolor: C,
    ) {
        let (x, y, cx, cy) = (x as i32, y as i32, cx as i32, cy as i32);
        let shift = lines.abs().min(cy);
        if lines > 0 {
            for row in y..y + cy {
                self.scroll_row(x, cx, row, row + shift, y..y + cy, bgcolor);
            }
        } else {
            for row in (y..y + cy).rev() {
                self.scroll_row(x, cx, row, row - shift, y..y + cy, bgcolor);
            }
        }
    }

    fn set_power(&mut self, _from: PowerMode, to: PowerMode) {
        self.power = to;
    }

    fn set_orientation(&mut self, _from: Orientation, to: Orientation) {
        self.orientation = to;
    }

    fn set_backlight(&mut self, percent: u8) {
        self.backlight = percent;
    }

    fn set_contrast(&mut self, percent: u8) {
        self.contrast = percent;
    }
}
