//! Window object model

use bitflags::bitflags;
use pictor_gdisp::{Coord, DisplayId, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::handle::WindowHandle;

/// Pixels removed from each side of a bordered container's content area
pub const BORDER_INSET: Coord = 2;

/// Window variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowKind {
    /// Plain drawing surface
    Window,
    /// Interactive element
    Widget,
    /// Window that owns and positions child windows
    Container,
}

bitflags! {
    /// Container options
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ContainerFlags: u8 {
        /// Draw a border and inset the content area by [`BORDER_INSET`]
        const BORDER = 1 << 0;
    }
}

/// Creation parameters
///
/// `x`/`y` are display coordinates for top-level windows and relative to
/// the parent's content area for children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowInit {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    pub height: Coord,
    /// Container to attach to, or `None` for a top-level window
    pub parent: Option<WindowHandle>,
    /// Visible immediately after creation
    pub show: bool,
}

impl WindowInit {
    /// Visible top-level window at the given position
    pub const fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Self {
            x,
            y,
            width,
            height,
            parent: None,
            show: true,
        }
    }

    /// Attach to a container
    pub const fn with_parent(mut self, parent: WindowHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Start hidden
    pub const fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Foreground and background color of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Colors<C> {
    /// Border and foreground
    pub color: C,
    /// Fill
    pub background: C,
}

/// Who frees a window's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ownership {
    /// Slot returns to the free pool on destroy
    Tree,
    /// Slot stays reserved for the caller on destroy
    Caller,
}

/// Teardown notification from [`WindowTree::destroy_with`](crate::WindowTree::destroy_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TreeEvent {
    /// Window removed from the tree; its children are already gone
    Destroyed(WindowHandle),
    /// Window's slot given back to its owner
    Released {
        handle: WindowHandle,
        ownership: Ownership,
    },
}

/// Window record stored in the arena
pub(crate) struct Window<C> {
    pub(crate) kind: WindowKind,
    pub(crate) display: DisplayId,
    /// Outer rectangle in display coordinates
    pub(crate) rect: Rect,
    /// Content area; zero-sized for non-containers
    pub(crate) inner: Rect,
    pub(crate) flags: ContainerFlags,
    pub(crate) colors: Colors<C>,
    pub(crate) visible: bool,
    pub(crate) parent: Option<u16>,
    /// Next sibling towards the top
    pub(crate) next: Option<u16>,
    /// Bottom-most child
    pub(crate) first_child: Option<u16>,
}

impl<C> Window<C> {
    pub(crate) fn new(
        kind: WindowKind,
        display: DisplayId,
        rect: Rect,
        flags: ContainerFlags,
        colors: Colors<C>,
        visible: bool,
        parent: Option<u16>,
    ) -> Self {
        let (inner, flags) = match kind {
            WindowKind::Container if flags.contains(ContainerFlags::BORDER) => {
                (rect.inset(BORDER_INSET), flags)
            }
            WindowKind::Container => (rect, flags),
            _ => (Rect::new(rect.x, rect.y, 0, 0), ContainerFlags::empty()),
        };
        Self {
            kind,
            display,
            rect,
            inner,
            flags,
            colors,
            visible,
            parent,
            next: None,
            first_child: None,
        }
    }

    pub(crate) fn has_border(&self) -> bool {
        self.kind == WindowKind::Container && self.flags.contains(ContainerFlags::BORDER)
    }
}
