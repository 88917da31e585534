//! Pointer input consumed by the drag controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Kind of device driving the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Map a DOM `pointerType` string. Unknown types behave like a mouse.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }
}

/// Node that receives the release listener for a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseTarget {
    /// The dragged clone itself.
    Clone,
    /// The source element. Touch pointers stay captured by the node they
    /// went down on, so the clone never sees the release.
    Source,
}

impl ReleaseTarget {
    /// Pick the release target for a pointer kind.
    pub fn for_pointer(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Touch => ReleaseTarget::Source,
            PointerKind::Mouse | PointerKind::Pen => ReleaseTarget::Clone,
        }
    }
}

/// A pointer event in both coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Position relative to the viewport.
    pub client: Point,
    /// Position relative to the document.
    pub page: Point,
    pub kind: PointerKind,
    /// Whether the event targets the source element.
    pub on_source: bool,
}

impl PointerInput {
    /// Input for an unscrolled page, where client and page coordinates agree.
    pub fn at(position: Point) -> Self {
        Self {
            client: position,
            page: position,
            kind: PointerKind::Mouse,
            on_source: false,
        }
    }

    /// Set the page position.
    pub fn with_page(mut self, page: Point) -> Self {
        self.page = page;
        self
    }

    /// Set the pointer kind.
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the input as targeting the source element.
    pub fn on_source(mut self) -> Self {
        self.on_source = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_kind_from_dom() {
        assert_eq!(PointerKind::from_dom("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_dom("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_dom("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_dom(""), PointerKind::Mouse);
    }

    #[test]
    fn test_release_target_for_touch() {
        assert_eq!(ReleaseTarget::for_pointer(PointerKind::Touch), ReleaseTarget::Source);
        assert_eq!(ReleaseTarget::for_pointer(PointerKind::Mouse), ReleaseTarget::Clone);
        assert_eq!(ReleaseTarget::for_pointer(PointerKind::Pen), ReleaseTarget::Clone);
    }

    #[test]
    fn test_builder() {
        let input = PointerInput::at(Point::new(5.0, 6.0))
            .with_page(Point::new(5.0, 106.0))
            .with_kind(PointerKind::Touch)
            .on_source();
        assert_eq!(input.client, Point::new(5.0, 6.0));
        assert_eq!(input.page, Point::new(5.0, 106.0));
        assert_eq!(input.kind, PointerKind::Touch);
        assert!(input.on_source);
    }
}
