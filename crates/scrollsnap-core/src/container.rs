//! Host-side view of a scrollable element
//!
//! The engine never touches a real widget tree. Hosts implement
//! [`ScrollContainer`] for whatever they scroll (a terminal pane, a DOM node
//! behind wasm, a test double) and the engine reads sizes and reads/writes
//! offsets through it.

use crate::geometry::Axis;

/// Dimensions of the surrounding viewport
///
/// Two measurements are kept because during initial layout either one can
/// legitimately read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Client size of the document root
    pub root_width: f64,
    pub root_height: f64,
    /// Inner size of the hosting window
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            root_width: width,
            root_height: height,
            inner_width: width,
            inner_height: height,
        }
    }

    /// Effective viewport size on an axis, never below one pixel
    pub fn extent(&self, axis: Axis) -> f64 {
        let (root, inner) = match axis {
            Axis::X => (self.root_width, self.inner_width),
            Axis::Y => (self.root_height, self.inner_height),
        };
        root.max(inner).max(1.0)
    }
}

/// A scrollable element bound to the snap engine
pub trait ScrollContainer {
    /// Current scroll offset (scrollLeft / scrollTop)
    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Write a new scroll offset
    fn set_scroll_offset(&mut self, axis: Axis, value: f64);

    /// Visible size of the container (clientWidth / clientHeight)
    fn client_size(&self, axis: Axis) -> f64;

    /// Total content size (scrollWidth / scrollHeight)
    fn scroll_size(&self, axis: Axis) -> f64;

    /// Size of the viewport the container lives in
    fn viewport(&self) -> Viewport;

    /// Largest offset the container can scroll to
    fn max_scroll(&self, axis: Axis) -> f64 {
        (self.scroll_size(axis) - self.client_size(axis)).max(0.0)
    }
}

impl<T: ScrollContainer + ?Sized> ScrollContainer for &mut T {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        (**self).scroll_offset(axis)
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f64) {
        (**self).set_scroll_offset(axis, value)
    }

    fn client_size(&self, axis: Axis) -> f64 {
        (**self).client_size(axis)
    }

    fn scroll_size(&self, axis: Axis) -> f64 {
        (**self).scroll_size(axis)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}
