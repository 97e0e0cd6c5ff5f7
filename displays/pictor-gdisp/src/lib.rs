//! Pictor GDISP - display driver layer
//!
//! This crate provides:
//! - [`DisplayDriver`] trait that board/controller ports implement
//! - [`Capabilities`] descriptor naming which primitives a port accelerates
//! - [`Gdisp`] front-end that validates, clips and dispatches every drawing
//!   call to the hardware or to the software emulation
//! - [`Font`] interface for externally supplied glyph bitmaps
//! - [`FrameBuffer`] in-memory backend with pixel readback
//!
//! # Architecture
//!
//! A port must supply only `init` and `draw_pixel`. Every other primitive is
//! optional: the port sets the matching flag in its `CAPABILITIES` constant
//! and overrides the method. For primitives a port leaves out, [`Gdisp`]
//! runs the emulation in [`emulate`], built from `draw_pixel` and the
//! other primitives.
//!
//! The selection is made on an associated constant, so each call site is
//! resolved when the driver type is monomorphized and carries no runtime
//! lookup.
//!
//! ```text
//! Gdisp::fill_area ──► validate/clip ──► CAPABILITIES.fills?
//!                                          ├─ yes ─► driver.fill_area
//!                                          └─ no  ─► emulate::fill_area ─► driver.draw_pixel
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod capabilities;
pub mod config;
pub mod control;
pub mod driver;
pub mod emulate;
pub mod font;
pub mod framebuffer;
pub mod gdisp;
pub mod types;

// Re-export key types
pub use capabilities::Capabilities;
pub use config::GdispConfig;
pub use control::Control;
pub use driver::DisplayDriver;
pub use font::{Font, Glyph};
pub use framebuffer::{Accelerated, Emulated, FrameBuffer, Profile};
pub use gdisp::Gdisp;
pub use types::{Coord, DisplayId, DisplayState, Orientation, PowerMode, Rect};
