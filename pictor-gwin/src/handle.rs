//! Window handles and storage tokens

/// Reference to a live window
///
/// The generation changes every time a slot is vacated, so handles to
/// destroyed windows are rejected rather than reaching a newer window. The
/// counter is 32 bits wide and wraps, so a handle kept across 2^32 reuses of
/// the same slot may resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowHandle {
    pub(crate) index: u16,
    pub(crate) generation: u32,
}

impl WindowHandle {
    /// Arena slot this handle points at
    pub fn index(&self) -> u16 {
        self.index
    }
}

/// Caller-owned window slot
///
/// Obtained from [`WindowTree::reserve`](crate::WindowTree::reserve). A
/// window created into it is never freed by the tree; destroying the window
/// hands the slot back to the holder of this token. Not `Clone`: the token
/// is consumed when the slot is released.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowStorage {
    pub(crate) index: u16,
    pub(crate) ticket: u16,
}

impl WindowStorage {
    /// Arena slot held by this token
    pub fn index(&self) -> u16 {
        self.index
    }
}
