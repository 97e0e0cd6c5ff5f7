//! Display geometry and state types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display coordinate
///
/// Signed so shapes may extend past the left and top edges.
pub type Coord = i16;

/// Axis-aligned rectangle in logical display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    pub height: Coord,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x as i32 + self.width as i32
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y as i32 + self.height as i32
    }

    /// Check if the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width < 1 || self.height < 1
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        x >= self.x && y >= self.y && (x as i32) < self.right() && (y as i32) < self.bottom()
    }

    /// Overlap of two rectangles, or `None` if they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 as i32 || y1 <= y0 as i32 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0 as i32) as Coord, (y1 - y0 as i32) as Coord))
    }

    /// Shrink by `inset` pixels on every side
    ///
    /// Collapses to zero size rather than going negative.
    pub fn inset(&self, inset: Coord) -> Rect {
        let width = (self.width as i32 - 2 * inset as i32).max(0) as Coord;
        let height = (self.height as i32 - 2 * inset as i32).max(0) as Coord;
        Rect::new(
            self.x.saturating_add(inset),
            self.y.saturating_add(inset),
            width,
            height,
        )
    }
}

/// Display orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    PortraitInverted,
    LandscapeInverted,
}

impl Orientation {
    /// Check if this orientation belongs to the landscape family
    ///
    /// Moving between families swaps the logical width and height.
    pub const fn is_landscape(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::LandscapeInverted)
    }

    /// Decode a raw control value
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Orientation::Portrait),
            1 => Some(Orientation::Landscape),
            2 => Some(Orientation::PortraitInverted),
            3 => Some(Orientation::LandscapeInverted),
            _ => None,
        }
    }
}

/// Display power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PowerMode {
    Off,
    #[default]
    On,
    Sleep,
}

impl PowerMode {
    /// Decode a raw control value
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(PowerMode::Off),
            1 => Some(PowerMode::On),
            2 => Some(PowerMode::Sleep),
            _ => None,
        }
    }
}

/// Identifies one physical display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayId(pub u8);

/// Runtime state of one display
///
/// `width` and `height` are logical, i.e. already account for the
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayState {
    pub width: Coord,
    pub height: Coord,
    pub orientation: Orientation,
    pub power: PowerMode,
    /// Backlight level, 0-100
    pub backlight: u8,
    /// Contrast level, 0-100
    pub contrast: u8,
}

impl DisplayState {
    /// Powered-on, portrait state for a panel of the given native size
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Portrait,
            power: PowerMode::On,
            backlight: 100,
            contrast: 50,
        }
    }

    /// Full display area
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}
