//! Ephemeral per-drag state.

use kurbo::{Point, Vec2};

/// State of one drag, from pick-up to release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<E> {
    /// The clone following the pointer.
    pub element: E,
    /// Pointer offset from the element's top-left corner at pick-up.
    pub shift: Vec2,
    /// Current top-left of the element in document coordinates.
    pub position: Point,
}

impl<E> DragSession<E> {
    pub fn new(element: E, shift: Vec2) -> Self {
        Self {
            element,
            shift,
            position: Point::ZERO,
        }
    }

    /// Top-left position that keeps the pick-up offset under `page`.
    pub fn position_for(&self, page: Point) -> Point {
        page - self.shift
    }
}
