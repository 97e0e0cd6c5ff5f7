//! Pictor Window Tree
//!
//! Window objects bound to a display, arranged in a z-ordered forest.
//!
//! # Architecture
//!
//! Windows live in a fixed-capacity arena ([`WindowTree`]). Parent, child
//! and sibling links are slot indices, and callers hold generational
//! [`WindowHandle`]s, so a handle to a destroyed window is detected instead
//! of aliasing whatever reused its slot.
//!
//! ```text
//! top level:  [A] ─► [B] ─► [C]          bottom ─► top
//!                     │
//!                     └─ first child: [B1] ─► [B2]
//! ```
//!
//! Every sibling list runs bottom to top. New windows are appended at the
//! tail, so they land on top; [`WindowTree::raise`] is the only reorder.
//!
//! Storage is either owned by the tree or reserved up front by the caller
//! with [`WindowTree::reserve`]. Caller-owned slots survive the window they
//! held and are only freed by [`WindowTree::release`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod handle;
mod render;
pub mod tree;
pub mod window;

// Re-export key types
pub use error::GwinError;
pub use handle::{WindowHandle, WindowStorage};
pub use tree::{Children, WindowTree};
pub use window::{Colors, ContainerFlags, Ownership, TreeEvent, WindowInit, WindowKind, BORDER_INSET};
