//! Redraw traversal

use pictor_gdisp::{DisplayDriver, Gdisp};

use crate::error::GwinError;
use crate::handle::WindowHandle;
use crate::tree::WindowTree;

impl<C: Copy, const N: usize> WindowTree<C, N> {
    /// Repaint a window and its visible descendants
    ///
    /// Hidden windows paint nothing, including their subtree.
    pub fn redraw<D: DisplayDriver<Color = C>>(
        &self,
        handle: WindowHandle,
        gdisp: &mut Gdisp<D>,
    ) -> Result<(), GwinError> {
        let index = self.resolve(handle)?;
        let window = self.window(index).ok_or(GwinError::InvalidHandle)?;
        if window.display != gdisp.id() {
            return Err(GwinError::WrongDisplay);
        }
        self.paint(index, gdisp);
        Ok(())
    }

    /// Repaint every top-level window bound to `gdisp`, bottom to top
    pub fn redraw_display<D: DisplayDriver<Color = C>>(&self, gdisp: &mut Gdisp<D>) {
        let mut current = self.head(None);
        while let Some(index) = current {
            let Some(window) = self.window(index) else {
                break;
            };
            if window.display == gdisp.id() {
                self.paint(index, gdisp);
            }
            current = window.next;
        }
    }

    fn paint<D: DisplayDriver<Color = C>>(&self, index: u16, gdisp: &mut Gdisp<D>) {
        let Some(window) = self.window(index) else {
            return;
        };
        if !window.visible {
            return;
        }

        let r = window.rect;
        gdisp.fill_area(r.x, r.y, r.width, r.height, window.colors.background);
        if window.has_border() {
            gdisp.draw_box(r.x, r.y, r.width, r.height, window.colors.color);
        }

        let mut child = window.first_child;
        while let Some(c) = child {
            self.paint(c, gdisp);
            child = self.window(c).and_then(|w| w.next);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Colors, ContainerFlags, GwinError, WindowInit, WindowTree};
    use pictor_gdisp::{Accelerated, DisplayId, FrameBuffer, Gdisp, GdispConfig};

    type Panel = FrameBuffer<u8, { 32 * 32 }, Accelerated>;

    fn display(id: u8) -> Gdisp<Panel> {
        Gdisp::new(DisplayId(id), Panel::new(32, 32).unwrap(), GdispConfig::default())
    }

    #[test]
    fn test_redraw_paints_background_border_then_children() {
        let mut gd = display(0);
        let mut tree = WindowTree::<u8, 8>::new();
        let parent = tree
            .create_container(
                &gd,
                None,
                &WindowInit::new(0, 0, 20, 20),
                Colors { color: 1, background: 2 },
                ContainerFlags::BORDER,
            )
            .unwrap();
        let bottom = WindowInit::new(0, 0, 10, 10).with_parent(parent);
        tree.create_window(&gd, None, &bottom, Colors { color: 0, background: 3 })
            .unwrap();
        let top = WindowInit::new(5, 5, 10, 10).with_parent(parent);
        tree.create_window(&gd, None, &top, Colors { color: 0, background: 4 })
            .unwrap();

        tree.redraw(parent, &mut gd).unwrap();
        let fb = gd.driver();
        assert_eq!(fb.pixel(0, 0), Some(1));
        assert_eq!(fb.pixel(19, 19), Some(1));
        assert_eq!(fb.pixel(1, 1), Some(2));
        // Children sit inside the 2px inset, the later one on top
        assert_eq!(fb.pixel(2, 2), Some(3));
        assert_eq!(fb.pixel(8, 8), Some(4));
        assert_eq!(fb.pixel(16, 16), Some(4));
        assert_eq!(fb.pixel(20, 20), Some(0));
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut gd = display(0);
        let mut tree = WindowTree::<u8, 8>::new();
        let colors = Colors { color: 1, background: 5 };
        let parent = tree
            .create_container(&gd, None, &WindowInit::new(0, 0, 10, 10), colors, ContainerFlags::empty())
            .unwrap();
        let child = tree
            .create_window(
                &gd,
                None,
                &WindowInit::new(0, 0, 4, 4).with_parent(parent),
                Colors { color: 1, background: 6 },
            )
            .unwrap();

        tree.set_visible(child, false).unwrap();
        tree.redraw_display(&mut gd);
        assert_eq!(gd.driver().count(5), 100);
        assert_eq!(gd.driver().count(6), 0);

        gd.clear(0);
        tree.set_visible(parent, false).unwrap();
        tree.set_visible(child, true).unwrap();
        tree.redraw_display(&mut gd);
        assert_eq!(gd.driver().count(0), 32 * 32);
    }

    #[test]
    fn test_redraw_rejects_other_display() {
        let gd = display(0);
        let mut other = display(1);
        let mut tree = WindowTree::<u8, 8>::new();
        let w = tree
            .create_window(&gd, None, &WindowInit::new(0, 0, 4, 4), Colors::default())
            .unwrap();
        assert_eq!(tree.redraw(w, &mut other), Err(GwinError::WrongDisplay));
    }
}
