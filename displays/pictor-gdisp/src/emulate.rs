//! Software emulation of drawing primitives
//!
//! Used by [`Gdisp`] for every primitive the port does not accelerate.
//! Shapes are built from the front-end's own `draw_pixel` and `fill_area`,
//! so they pick up validation and whatever acceleration the port does
//! have (a port with hardware fills gets fast filled circles for free).
//!
//! Shape algorithms work in `i32` so shapes may hang off any edge of the
//! coordinate space; pixels outside the `Coord` range are dropped.

use crate::driver::DisplayDriver;
use crate::font::Font;
use crate::gdisp::Gdisp;
use crate::types::{Coord, Rect};

/// Plot one pixel, dropping anything outside the coordinate space
fn plot<D: DisplayDriver>(gd: &mut Gdisp<D>, x: i32, y: i32, color: D::Color) {
    if let (Ok(x), Ok(y)) = (Coord::try_from(x), Coord::try_from(y)) {
        gd.draw_pixel(x, y, color);
    }
}

/// Fill the horizontal span `x0..=x1` on row `y`
fn span<D: DisplayDriver>(gd: &mut Gdisp<D>, x0: i32, x1: i32, y: i32, color: D::Color) {
    let Ok(y) = Coord::try_from(y) else {
        return;
    };
    let x0 = x0.max(Coord::MIN as i32);
    let x1 = x1.min(Coord::MAX as i32);
    if x1 < x0 {
        return;
    }
    let width = (x1 - x0 + 1).min(Coord::MAX as i32);
    gd.fill_area(x0 as Coord, y, width as Coord, 1, color);
}

/// Fill the whole display through the fill path
pub(crate) fn clear<D: DisplayDriver>(gd: &mut Gdisp<D>, color: D::Color) {
    let bounds = gd.state().bounds();
    gd.fill_unchecked(bounds, color);
}

/// Fill a rectangle pixel by pixel
///
/// `area` must already be validated. Pixels past the end of the coordinate
/// space are dropped.
pub fn fill_area<D: DisplayDriver>(driver: &mut D, area: Rect, color: D::Color) {
    let end = Coord::MAX as i32 + 1;
    for y in area.y as i32..area.bottom().min(end) {
        for x in area.x as i32..area.right().min(end) {
            driver.draw_pixel(x as Coord, y as Coord, color);
        }
    }
}

/// Copy a bitmap pixel by pixel
///
/// `buffer` holds `cy` rows of `cx` pixels; geometry must already be
/// validated. Pixels past the end of the coordinate space are dropped.
pub fn blit_area<D: DisplayDriver>(
    driver: &mut D,
    x: Coord,
    y: Coord,
    cx: Coord,
    cy: Coord,
    buffer: &[D::Color],
) {
    if cx < 1 || cy < 1 {
        return;
    }
    for (row, line) in buffer.chunks_exact(cx as usize).take(cy as usize).enumerate() {
        let Ok(py) = Coord::try_from(y as i32 + row as i32) else {
            break;
        };
        for (col, &color) in line.iter().enumerate() {
            let Ok(px) = Coord::try_from(x as i32 + col as i32) else {
                break;
            };
            driver.draw_pixel(px, py, color);
        }
    }
}

/// Bresenham line, endpoints inclusive
///
/// Endpoints are put in a canonical order first so a line draws the same
/// pixels in both directions. Axis-aligned lines become fills when the port
/// accelerates them.
pub fn draw_line<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    color: D::Color,
) {
    if D::CAPABILITIES.fills && (x0 == x1 || y0 == y1) {
        let (left, top) = (x0.min(x1), y0.min(y1));
        let width = (x0.abs_diff(x1) as i32 + 1).min(Coord::MAX as i32) as Coord;
        let height = (y0.abs_diff(y1) as i32 + 1).min(Coord::MAX as i32) as Coord;
        gd.fill_area(left, top, width, height, color);
        return;
    }

    let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
        ((x0 as i32, y0 as i32), (x1 as i32, y1 as i32))
    } else {
        ((x1 as i32, y1 as i32), (x0 as i32, y0 as i32))
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        plot(gd, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Midpoint circle outline
pub fn draw_circle<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    radius: Coord,
    color: D::Color,
) {
    if radius < 1 {
        return;
    }
    let (x, y) = (x as i32, y as i32);
    let (mut a, mut b) = (0i32, radius as i32);
    let mut p = 1 - b;

    while a <= b {
        plot(gd, x + a, y + b, color);
        plot(gd, x + b, y + a, color);
        plot(gd, x - a, y + b, color);
        plot(gd, x - b, y + a, color);
        plot(gd, x + a, y - b, color);
        plot(gd, x + b, y - a, color);
        plot(gd, x - a, y - b, color);
        plot(gd, x - b, y - a, color);

        if p < 0 {
            p += 3 + 2 * a;
            a += 1;
        } else {
            p += 5 + 2 * (a - b);
            a += 1;
            b -= 1;
        }
    }
}

/// Filled circle from horizontal spans
pub fn fill_circle<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    radius: Coord,
    color: D::Color,
) {
    if radius < 1 {
        return;
    }
    let (x, y) = (x as i32, y as i32);
    let (mut a, mut b) = (0i32, radius as i32);
    let mut p = 1 - b;

    while a <= b {
        span(gd, x - b, x + b, y + a, color);
        span(gd, x - b, x + b, y - a, color);
        span(gd, x - a, x + a, y + b, color);
        span(gd, x - a, x + a, y - b, color);

        if p < 0 {
            p += 3 + 2 * a;
            a += 1;
        } else {
            p += 5 + 2 * (a - b);
            a += 1;
            b -= 1;
        }
    }
}

/// Ellipse outline with horizontal radius `a` and vertical radius `b`
pub fn draw_ellipse<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    a: Coord,
    b: Coord,
    color: D::Color,
) {
    if a < 1 || b < 1 {
        return;
    }
    let (x, y) = (x as i32, y as i32);
    let (a, b) = (a as i64, b as i64);
    let (a2, b2) = (a * a, b * b);
    let (mut dx, mut dy) = (0i64, b);
    let mut err = b2 - (2 * b - 1) * a2;

    while dy >= 0 {
        let (px, py) = (dx as i32, dy as i32);
        plot(gd, x + px, y + py, color);
        plot(gd, x - px, y + py, color);
        plot(gd, x - px, y - py, color);
        plot(gd, x + px, y - py, color);

        let e2 = 2 * err;
        if e2 < (2 * dx + 1) * b2 {
            dx += 1;
            err += (2 * dx + 1) * b2;
        }
        if e2 > -(2 * dy - 1) * a2 {
            dy -= 1;
            err -= (2 * dy - 1) * a2;
        }
    }

    // Finish the flat tips of very thin ellipses
    while dx < a {
        dx += 1;
        plot(gd, x + dx as i32, y, color);
        plot(gd, x - dx as i32, y, color);
    }
}

/// Filled ellipse from horizontal spans
pub fn fill_ellipse<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    a: Coord,
    b: Coord,
    color: D::Color,
) {
    if a < 1 || b < 1 {
        return;
    }
    let (x, y) = (x as i32, y as i32);
    let (a, b) = (a as i64, b as i64);
    let (a2, b2) = (a * a, b * b);
    let (mut dx, mut dy) = (0i64, b);
    let mut err = b2 - (2 * b - 1) * a2;

    while dy >= 0 {
        let e2 = 2 * err;
        if e2 < (2 * dx + 1) * b2 {
            dx += 1;
            err += (2 * dx + 1) * b2;
        }
        if e2 > -(2 * dy - 1) * a2 {
            let (px, py) = (dx as i32, dy as i32);
            span(gd, x - px, x + px, y + py, color);
            if py != 0 {
                span(gd, x - px, x + px, y - py, color);
            }
            dy -= 1;
            err -= (2 * dy - 1) * a2;
        }
    }

    while dx < a {
        dx += 1;
        span(gd, x - dx as i32, x + dx as i32, y, color);
    }
}

/// Glyph foreground only
pub fn draw_char<D: DisplayDriver, F: Font + ?Sized>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    c: char,
    font: &F,
    color: D::Color,
) {
    let Some(glyph) = font.glyph(c) else {
        return;
    };
    for row in 0..font.height().max(0) as usize {
        for col in 0..glyph.width.min(32) {
            if glyph.is_set(col, row) {
                plot(gd, x as i32 + col as i32, y as i32 + row as i32, color);
            }
        }
    }
}

/// Whole glyph cell, background included
pub fn fill_char<D: DisplayDriver, F: Font + ?Sized>(
    gd: &mut Gdisp<D>,
    x: Coord,
    y: Coord,
    c: char,
    font: &F,
    color: D::Color,
    bgcolor: D::Color,
) {
    let Some(glyph) = font.glyph(c) else {
        return;
    };
    for row in 0..font.height().max(0) as usize {
        for col in 0..glyph.width.min(32) {
            let ink = if glyph.is_set(col, row) { color } else { bgcolor };
            plot(gd, x as i32 + col as i32, y as i32 + row as i32, ink);
        }
    }
}

/// Scroll by copying pixels through readback
///
/// `area` must already be validated and `0 < |lines| < area.height`.
pub(crate) fn vertical_scroll<D: DisplayDriver>(
    gd: &mut Gdisp<D>,
    area: Rect,
    lines: i32,
    bgcolor: D::Color,
) {
    let (x, y) = (area.x as i32, area.y as i32);
    let (cx, cy) = (area.width as i32, area.height as i32);
    let shift = lines.abs();

    let copy_row = |gd: &mut Gdisp<D>, dst: i32, src: i32| {
        let driver = gd.driver_mut();
        for col in x..x + cx {
            let color = driver.get_pixel_color(col as Coord, src as Coord);
            driver.draw_pixel(col as Coord, dst as Coord, color);
        }
    };

    if lines > 0 {
        // Content moves up: walk top to bottom
        for row in y..y + cy - shift {
            copy_row(gd, row, row + shift);
        }
        let exposed = Rect::new(area.x, (y + cy - shift) as Coord, area.width, shift as Coord);
        gd.fill_unchecked(exposed, bgcolor);
    } else {
        // Content moves down: walk bottom to top
        for row in (y + shift..y + cy).rev() {
            copy_row(gd, row, row - shift);
        }
        let exposed = Rect::new(area.x, area.y, area.width, shift as Coord);
        gd.fill_unchecked(exposed, bgcolor);
    }
}
