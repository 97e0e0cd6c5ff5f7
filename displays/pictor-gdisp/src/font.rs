//! Font interface
//!
//! Glyph bitmaps live outside this crate; a font is anything that can hand
//! out fixed-height glyphs by character.

use crate::types::Coord;

/// One glyph bitmap
///
/// `rows` holds one entry per font row, top to bottom. Bit `n` of a row is
/// column `n` counted from the left edge; set bits are foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Glyph cell width in pixels (at most 32)
    pub width: u8,
    /// Row bitmaps
    pub rows: &'a [u32],
}

impl Glyph<'_> {
    /// Check if the pixel at (`col`, `row`) is foreground
    pub fn is_set(&self, col: u8, row: usize) -> bool {
        col < self.width.min(32)
            && self
                .rows
                .get(row)
                .is_some_and(|bits| bits & (1u32 << col) != 0)
    }
}

/// Fixed-height bitmap font
pub trait Font {
    /// Height of every glyph in pixels
    fn height(&self) -> Coord;

    /// Look up the glyph for a character
    ///
    /// Returns `None` for characters the font does not cover; nothing is
    /// drawn for them.
    fn glyph(&self, c: char) -> Option<Glyph<'_>>;

    /// Horizontal gap between glyphs in a string
    fn spacing(&self) -> Coord {
        1
    }

    /// Advance of one character in a string
    fn advance(&self, c: char) -> Coord {
        self.glyph(c)
            .map(|g| g.width as Coord + self.spacing())
            .unwrap_or(0)
    }

    /// Width of a string as drawn by `draw_string`
    fn string_width(&self, text: &str) -> Coord {
        let total: i32 = text.chars().map(|c| self.advance(c) as i32).sum();
        let trailing = if total > 0 { self.spacing() as i32 } else { 0 };
        (total - trailing).clamp(0, Coord::MAX as i32) as Coord
    }
}


#[cfg(test)]
mod tests {
    use super::test_font::TinyFont;
    use super::*;

    #[test]
    fn test_glyph_bits() {
        let glyph = TinyFont.glyph('L').unwrap();
        assert!(glyph.is_set(0, 0));
        assert!(!glyph.is_set(1, 0));
        assert!(glyph.is_set(2, 4));
        // Outside the cell
        assert!(!glyph.is_set(3, 4));
        assert!(!glyph.is_set(0, 5));
    }

    #[test]
    fn test_string_width() {
        assert_eq!(TinyFont.string_width(""), 0);
        assert_eq!(TinyFont.string_width("A"), 3);
        assert_eq!(TinyFont.string_width("AIL"), 11);
        // Unknown characters take no space
        assert_eq!(TinyFont.string_width("A?L"), 7);
    }
}
