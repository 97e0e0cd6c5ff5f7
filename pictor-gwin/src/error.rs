//! Window tree errors

/// Window tree operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GwinError {
    /// Requested geometry does not overlap the display or parent content area
    NoDrawableArea,
    /// Arena is full
    OutOfSlots,
    /// Handle or storage token does not refer to a live slot
    InvalidHandle,
    /// Parent is not a container
    InvalidParent,
    /// Caller-owned storage already holds a window
    StorageInUse,
    /// Window belongs to a different display
    WrongDisplay,
}
