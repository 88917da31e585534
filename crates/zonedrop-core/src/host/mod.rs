//! Document abstraction the drag controller runs against.

mod memory;

pub use memory::{HostOp, MemoryDocument, MemoryHost, NodeId};

use crate::config::ElementIds;
use crate::error::{DragError, DragResult};
use crate::input::ReleaseTarget;
use crate::zone::ZoneKind;
use kurbo::{Point, Rect};
use peniko::Color;

/// Capabilities the controller needs from a document.
///
/// Implementations exist for the browser DOM and for an in-memory tree.
/// Every query is answered live; the controller never caches geometry.
/// Rectangles are in viewport coordinates.
pub trait DragHost {
    /// Handle to an element in the document.
    type Element;

    /// Bounds of the source element.
    fn source_bounds(&self) -> DragResult<Rect>;

    /// Deep-clone the source element without its id. The clone is detached.
    fn clone_source(&mut self) -> DragResult<Self::Element>;

    /// Set the source element's background colour.
    fn paint_source(&mut self, color: Color) -> DragResult<()>;

    /// Move an element under the document body.
    fn attach_to_body(&mut self, element: &Self::Element) -> DragResult<()>;

    /// Set an element's absolute top-left position, relative to its parent.
    fn move_element(&mut self, element: &Self::Element, position: Point) -> DragResult<()>;

    fn set_element_class(
        &mut self,
        element: &Self::Element,
        class: &str,
        enabled: bool,
    ) -> DragResult<()>;

    /// Take an element out of the document.
    fn remove_element(&mut self, element: &Self::Element) -> DragResult<()>;

    /// Bounds of a zone.
    fn zone_bounds(&self, zone: ZoneKind) -> DragResult<Rect>;

    fn set_zone_class(&mut self, zone: ZoneKind, class: &str, enabled: bool) -> DragResult<()>;

    /// Whether a zone's content is taller than its visible area.
    fn zone_overflows(&self, zone: ZoneKind) -> DragResult<bool>;

    /// Move an element to be the last child of a zone.
    fn append_to_zone(&mut self, zone: ZoneKind, element: &Self::Element) -> DragResult<()>;

    /// Route pointer move and release events to the controller for a drag of
    /// `element`, and block the native drag gesture on it.
    fn listen(&mut self, element: &Self::Element, release: ReleaseTarget) -> DragResult<()>;

    /// Stop routing move and release events.
    fn unlisten(&mut self) -> DragResult<()>;

    /// Show a message in the error slot.
    fn report_error(&mut self, message: &str);
}

/// The four nodes the controller requires, resolved by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<T> {
    pub source: T,
    pub grid: T,
    pub free: T,
    pub error: T,
}

impl<T> Layout<T> {
    /// Look up every required node. The first missing id is returned as
    /// [`DragError::MissingElement`].
    pub fn resolve<F>(ids: &ElementIds, mut lookup: F) -> DragResult<Self>
    where
        F: FnMut(&str) -> Option<T>,
    {
        let mut find = |id: &str| lookup(id).ok_or_else(|| DragError::MissingElement(id.to_string()));
        Ok(Self {
            source: find(&ids.source)?,
            grid: find(&ids.grid)?,
            free: find(&ids.free)?,
            error: find(&ids.error)?,
        })
    }

    /// Node backing a zone.
    pub fn zone(&self, zone: ZoneKind) -> &T {
        match zone {
            ZoneKind::Grid => &self.grid,
            ZoneKind::Free => &self.free,
        }
    }
}
