//! Arena-backed window tree
//!
//! Slots are recycled through a generation counter. Links between windows
//! are plain slot indices and are only ever followed from a live window, so
//! a destroyed subtree cannot be reached again.

use heapless::Vec;
use pictor_gdisp::{Coord, DisplayDriver, DisplayId, Gdisp, Rect};

use crate::error::GwinError;
use crate::handle::{WindowHandle, WindowStorage};
use crate::window::{Colors, ContainerFlags, Ownership, TreeEvent, Window, WindowInit, WindowKind};

enum SlotState<C> {
    Free,
    /// Held by a [`WindowStorage`] with no window in it
    Reserved,
    Occupied {
        window: Window<C>,
        owner: Ownership,
    },
}

struct Slot<C> {
    /// Bumped whenever the window in this slot goes away
    generation: u32,
    /// Bumped on every reservation, matched against [`WindowStorage`]
    ticket: u16,
    state: SlotState<C>,
}

/// Window forest holding up to `N` windows
pub struct WindowTree<C, const N: usize> {
    slots: Vec<Slot<C>, N>,
    /// Bottom-most top-level window
    first_top: Option<u16>,
}

impl<C: Copy, const N: usize> Default for WindowTree<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy, const N: usize> WindowTree<C, N> {
    /// Create an empty tree
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            first_top: None,
        }
    }

    /// Number of live windows
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.state, SlotState::Occupied { .. }))
            .count()
    }

    /// Check if the tree holds no windows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of windows and reservations
    pub const fn capacity(&self) -> usize {
        N
    }

    // ---- Storage ----

    /// Reserve a slot for a caller-owned window
    pub fn reserve(&mut self) -> Result<WindowStorage, GwinError> {
        let index = self.free_slot()?;
        let slot = &mut self.slots[index as usize];
        slot.ticket = slot.ticket.wrapping_add(1);
        slot.state = SlotState::Reserved;
        Ok(WindowStorage {
            index,
            ticket: slot.ticket,
        })
    }

    /// Give a reserved slot back to the free pool
    ///
    /// Fails with `StorageInUse` while a window still lives in it.
    pub fn release(&mut self, storage: WindowStorage) -> Result<(), GwinError> {
        let slot = self
            .slots
            .get_mut(storage.index as usize)
            .filter(|s| s.ticket == storage.ticket)
            .ok_or(GwinError::InvalidHandle)?;
        match slot.state {
            SlotState::Reserved => {
                slot.state = SlotState::Free;
                Ok(())
            }
            SlotState::Occupied {
                owner: Ownership::Caller,
                ..
            } => Err(GwinError::StorageInUse),
            _ => Err(GwinError::InvalidHandle),
        }
    }

    /// Find or append a free slot
    fn free_slot(&mut self) -> Result<u16, GwinError> {
        if let Some(index) = self
            .slots
            .iter()
            .position(|s| matches!(s.state, SlotState::Free))
        {
            return Ok(index as u16);
        }
        let index = u16::try_from(self.slots.len()).map_err(|_| GwinError::OutOfSlots)?;
        self.slots
            .push(Slot {
                generation: 0,
                ticket: 0,
                state: SlotState::Free,
            })
            .map_err(|_| GwinError::OutOfSlots)?;
        Ok(index)
    }

    /// Pick the slot a new window goes into
    fn claim(&mut self, storage: Option<&WindowStorage>) -> Result<(u16, Ownership), GwinError> {
        let Some(storage) = storage else {
            return Ok((self.free_slot()?, Ownership::Tree));
        };
        let slot = self
            .slots
            .get(storage.index as usize)
            .filter(|s| s.ticket == storage.ticket)
            .ok_or(GwinError::InvalidHandle)?;
        match slot.state {
            SlotState::Reserved => Ok((storage.index, Ownership::Caller)),
            SlotState::Occupied {
                owner: Ownership::Caller,
                ..
            } => Err(GwinError::StorageInUse),
            _ => Err(GwinError::InvalidHandle),
        }
    }

    // ---- Creation ----

    /// Create a plain window on `gdisp`
    pub fn create_window<D: DisplayDriver<Color = C>>(
        &mut self,
        gdisp: &Gdisp<D>,
        storage: Option<&WindowStorage>,
        init: &WindowInit,
        colors: Colors<C>,
    ) -> Result<WindowHandle, GwinError> {
        self.create(
            gdisp.id(),
            gdisp.state().bounds(),
            storage,
            init,
            colors,
            WindowKind::Window,
            ContainerFlags::empty(),
        )
    }

    /// Create a widget on `gdisp`
    pub fn create_widget<D: DisplayDriver<Color = C>>(
        &mut self,
        gdisp: &Gdisp<D>,
        storage: Option<&WindowStorage>,
        init: &WindowInit,
        colors: Colors<C>,
    ) -> Result<WindowHandle, GwinError> {
        self.create(
            gdisp.id(),
            gdisp.state().bounds(),
            storage,
            init,
            colors,
            WindowKind::Widget,
            ContainerFlags::empty(),
        )
    }

    /// Create an empty container on `gdisp`
    pub fn create_container<D: DisplayDriver<Color = C>>(
        &mut self,
        gdisp: &Gdisp<D>,
        storage: Option<&WindowStorage>,
        init: &WindowInit,
        colors: Colors<C>,
        flags: ContainerFlags,
    ) -> Result<WindowHandle, GwinError> {
        self.create(
            gdisp.id(),
            gdisp.state().bounds(),
            storage,
            init,
            colors,
            WindowKind::Container,
            flags,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn create(
        &mut self,
        display: DisplayId,
        bounds: Rect,
        storage: Option<&WindowStorage>,
        init: &WindowInit,
        colors: Colors<C>,
        kind: WindowKind,
        flags: ContainerFlags,
    ) -> Result<WindowHandle, GwinError> {
        let result = self.try_create(display, bounds, storage, init, colors, kind, flags);

        #[cfg(feature = "defmt")]
        match &result {
            Ok(handle) => defmt::debug!("Created {} {} on display {}", kind, handle, display.0),
            Err(e) => defmt::warn!("Failed to create {}: {}", kind, e),
        }

        result
    }

    #[allow(clippy::too_many_arguments)]
    fn try_create(
        &mut self,
        display: DisplayId,
        bounds: Rect,
        storage: Option<&WindowStorage>,
        init: &WindowInit,
        colors: Colors<C>,
        kind: WindowKind,
        flags: ContainerFlags,
    ) -> Result<WindowHandle, GwinError> {
        // Children are placed inside the parent's content area
        let (parent, area) = match init.parent {
            Some(handle) => {
                let index = self.resolve(handle)?;
                let parent = self.window(index).ok_or(GwinError::InvalidHandle)?;
                if parent.kind != WindowKind::Container {
                    return Err(GwinError::InvalidParent);
                }
                if parent.display != display {
                    return Err(GwinError::WrongDisplay);
                }
                (Some(index), parent.inner)
            }
            None => (None, bounds),
        };

        let requested = Rect::new(
            area.x.saturating_add(init.x),
            area.y.saturating_add(init.y),
            init.width,
            init.height,
        );
        let rect = area
            .intersect(&requested)
            .ok_or(GwinError::NoDrawableArea)?;

        let (index, owner) = self.claim(storage)?;
        let window = Window::new(kind, display, rect, flags, colors, init.show, parent);
        let slot = &mut self.slots[index as usize];
        slot.state = SlotState::Occupied { window, owner };
        let handle = WindowHandle {
            index,
            generation: slot.generation,
        };

        self.append(parent, index);
        Ok(handle)
    }

    // ---- Destruction ----

    /// Destroy a window and everything below it
    pub fn destroy(&mut self, handle: WindowHandle) -> Result<(), GwinError> {
        self.destroy_with(handle, |_| {})
    }

    /// Destroy a window and everything below it, reporting each step
    ///
    /// Children are torn down depth-first before their container. For every
    /// window the observer sees `Destroyed` once it is unlinked, then
    /// `Released` once its slot goes back to its owner.
    pub fn destroy_with<F: FnMut(TreeEvent)>(
        &mut self,
        handle: WindowHandle,
        mut observer: F,
    ) -> Result<(), GwinError> {
        let index = self.resolve(handle)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Destroying {}", handle);

        self.teardown(index, &mut observer);
        Ok(())
    }

    /// Destroy every window bound to `display`
    ///
    /// Returns the number of windows destroyed.
    pub fn destroy_display(&mut self, display: DisplayId) -> usize {
        let mut destroyed = 0;
        let mut current = self.first_top;
        while let Some(index) = current {
            let Some(window) = self.window(index) else {
                break;
            };
            current = window.next;
            if window.display == display {
                self.teardown(index, &mut |event| {
                    if let TreeEvent::Destroyed(_) = event {
                        destroyed += 1;
                    }
                });
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Display {}: destroyed {} windows", display.0, destroyed);

        destroyed
    }

    fn teardown<F: FnMut(TreeEvent)>(&mut self, index: u16, observer: &mut F) {
        while let Some(child) = self.window(index).and_then(|w| w.first_child) {
            self.teardown(child, observer);
        }

        self.unlink(index);
        let handle = self.handle_at(index);
        observer(TreeEvent::Destroyed(handle));

        let Some(slot) = self.slots.get_mut(index as usize) else {
            return;
        };
        let SlotState::Occupied { owner, .. } = slot.state else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = match owner {
            Ownership::Tree => SlotState::Free,
            Ownership::Caller => SlotState::Reserved,
        };
        observer(TreeEvent::Released {
            handle,
            ownership: owner,
        });
    }

    // ---- Links ----

    pub(crate) fn window(&self, index: u16) -> Option<&Window<C>> {
        match self.slots.get(index as usize).map(|s| &s.state) {
            Some(SlotState::Occupied { window, .. }) => Some(window),
            _ => None,
        }
    }

    fn window_mut(&mut self, index: u16) -> Option<&mut Window<C>> {
        match self.slots.get_mut(index as usize).map(|s| &mut s.state) {
            Some(SlotState::Occupied { window, .. }) => Some(window),
            _ => None,
        }
    }

    /// Slot index of a live handle
    pub(crate) fn resolve(&self, handle: WindowHandle) -> Result<u16, GwinError> {
        match self.slots.get(handle.index as usize) {
            Some(Slot {
                generation,
                state: SlotState::Occupied { .. },
                ..
            }) if *generation == handle.generation => Ok(handle.index),
            _ => Err(GwinError::InvalidHandle),
        }
    }

    fn lookup(&self, handle: WindowHandle) -> Option<&Window<C>> {
        self.resolve(handle).ok().and_then(|i| self.window(i))
    }

    fn handle_at(&self, index: u16) -> WindowHandle {
        WindowHandle {
            index,
            generation: self.slots.get(index as usize).map_or(0, |s| s.generation),
        }
    }

    /// Bottom-most window of a sibling list
    pub(crate) fn head(&self, parent: Option<u16>) -> Option<u16> {
        match parent {
            Some(p) => self.window(p).and_then(|w| w.first_child),
            None => self.first_top,
        }
    }

    fn set_head(&mut self, parent: Option<u16>, head: Option<u16>) {
        match parent {
            Some(p) => {
                if let Some(w) = self.window_mut(p) {
                    w.first_child = head;
                }
            }
            None => self.first_top = head,
        }
    }

    /// Put a window on top of its sibling list
    fn append(&mut self, parent: Option<u16>, index: u16) {
        let Some(mut last) = self.head(parent) else {
            self.set_head(parent, Some(index));
            return;
        };
        while let Some(next) = self.window(last).and_then(|w| w.next) {
            last = next;
        }
        if let Some(w) = self.window_mut(last) {
            w.next = Some(index);
        }
    }

    /// Take a window out of its sibling list
    fn unlink(&mut self, index: u16) {
        let Some(window) = self.window(index) else {
            return;
        };
        let (parent, next) = (window.parent, window.next);

        let mut current = self.head(parent);
        if current == Some(index) {
            self.set_head(parent, next);
        } else {
            while let Some(c) = current {
                let after = self.window(c).and_then(|w| w.next);
                if after == Some(index) {
                    if let Some(w) = self.window_mut(c) {
                        w.next = next;
                    }
                    break;
                }
                current = after;
            }
        }

        if let Some(w) = self.window_mut(index) {
            w.next = None;
        }
    }

    // ---- Traversal ----

    /// Bottom-most child of `parent`, or of the top level for `None`
    pub fn get_first_child(&self, parent: Option<WindowHandle>) -> Option<WindowHandle> {
        let head = match parent {
            Some(handle) => self.lookup(handle)?.first_child,
            None => self.first_top,
        };
        head.map(|i| self.handle_at(i))
    }

    /// Next window above `handle` in the same sibling list
    pub fn get_sibling(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.lookup(handle)?.next.map(|i| self.handle_at(i))
    }

    /// Children of `parent` bottom to top; top-level windows for `None`
    pub fn children(&self, parent: Option<WindowHandle>) -> Children<'_, C, N> {
        Children {
            tree: self,
            next: self.get_first_child(parent),
        }
    }

    /// Container holding `handle`, `None` for top-level windows
    pub fn parent(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.lookup(handle)?.parent.map(|i| self.handle_at(i))
    }

    /// Check if `handle` refers to a live window
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    // ---- Properties ----

    /// Window variant
    pub fn kind(&self, handle: WindowHandle) -> Option<WindowKind> {
        self.lookup(handle).map(|w| w.kind)
    }

    /// Display the window is bound to
    pub fn display(&self, handle: WindowHandle) -> Option<DisplayId> {
        self.lookup(handle).map(|w| w.display)
    }

    /// Outer rectangle in display coordinates
    pub fn rect(&self, handle: WindowHandle) -> Option<Rect> {
        self.lookup(handle).map(|w| w.rect)
    }

    /// Content area in display coordinates; zero-sized for non-containers
    pub fn inner_rect(&self, handle: WindowHandle) -> Option<Rect> {
        self.lookup(handle).map(|w| w.inner)
    }

    /// Content width, 0 for non-containers and dead handles
    pub fn get_inner_width(&self, handle: WindowHandle) -> Coord {
        self.lookup(handle).map_or(0, |w| w.inner.width)
    }

    /// Content height, 0 for non-containers and dead handles
    pub fn get_inner_height(&self, handle: WindowHandle) -> Coord {
        self.lookup(handle).map_or(0, |w| w.inner.height)
    }

    /// Container options; empty for non-containers
    pub fn flags(&self, handle: WindowHandle) -> Option<ContainerFlags> {
        self.lookup(handle).map(|w| w.flags)
    }

    /// Window colors
    pub fn colors(&self, handle: WindowHandle) -> Option<Colors<C>> {
        self.lookup(handle).map(|w| w.colors)
    }

    /// Change window colors
    pub fn set_colors(&mut self, handle: WindowHandle, colors: Colors<C>) -> Result<(), GwinError> {
        let index = self.resolve(handle)?;
        let window = self.window_mut(index).ok_or(GwinError::InvalidHandle)?;
        window.colors = colors;
        Ok(())
    }

    /// Check if a window is shown; hidden windows hide their subtree
    pub fn is_visible(&self, handle: WindowHandle) -> bool {
        self.lookup(handle).is_some_and(|w| w.visible)
    }

    /// Show or hide a window
    pub fn set_visible(&mut self, handle: WindowHandle, visible: bool) -> Result<(), GwinError> {
        let index = self.resolve(handle)?;
        let window = self.window_mut(index).ok_or(GwinError::InvalidHandle)?;
        window.visible = visible;
        Ok(())
    }

    // ---- Z-order ----

    /// Move a window to the top of its sibling list
    pub fn raise(&mut self, handle: WindowHandle) -> Result<(), GwinError> {
        let index = self.resolve(handle)?;
        let parent = self.window(index).and_then(|w| w.parent);
        self.unlink(index);
        self.append(parent, index);
        Ok(())
    }
}

/// Iterator over a sibling list, bottom to top
pub struct Children<'a, C, const N: usize> {
    tree: &'a WindowTree<C, N>,
    next: Option<WindowHandle>,
}

impl<C: Copy, const N: usize> Iterator for Children<'_, C, N> {
    type Item = WindowHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.get_sibling(current);
        Some(current)
    }
}
