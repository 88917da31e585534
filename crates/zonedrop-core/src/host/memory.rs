//! In-memory document host.

use super::{DragHost, Layout};
use crate::config::ElementIds;
use crate::error::{DragError, DragResult};
use crate::input::ReleaseTarget;
use crate::zone::ZoneKind;
use kurbo::{Point, Rect};
use peniko::Color;
use std::collections::{BTreeSet, HashSet};

/// Handle to a node of a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Host operations that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    SourceBounds,
    CloneSource,
    PaintSource,
    AttachToBody,
    MoveElement,
    ElementClass,
    RemoveElement,
    ZoneBounds,
    ZoneClass,
    ZoneOverflow,
    AppendToZone,
    Listen,
    Unlisten,
}

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: BTreeSet<String>,
    /// Viewport bounds for laid-out nodes; only the size matters for clones.
    rect: Rect,
    /// Inline `left`/`top`, if set.
    position: Option<Point>,
    background: Option<Color>,
}

impl Node {
    fn new(id: Option<&str>, rect: Rect) -> Self {
        Self {
            id: id.map(str::to_string),
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::new(),
            rect,
            position: None,
            background: None,
        }
    }
}

/// A flat document: a body with id-tagged children.
///
/// Used to stage the page before resolving the required nodes.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    const BODY: NodeId = NodeId(0);

    /// Create a document holding only a body.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, Rect::ZERO)],
        }
    }

    /// Append a node with the given id and viewport bounds to the body.
    pub fn insert(&mut self, id: &str, rect: Rect) -> NodeId {
        let node = NodeId(self.nodes.len());
        let mut data = Node::new(Some(id), rect);
        data.parent = Some(Self::BODY);
        self.nodes.push(data);
        self.nodes[Self::BODY.0].children.push(node);
        node
    }

    fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }
}

/// Simulated document for tests and the native demo.
///
/// Keeps a real parent/child tree so the single-parent invariant can be
/// checked, and can fail any [`HostOp`] on request.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    layout: Layout<NodeId>,
    /// Active release listener, if any.
    listening: Option<(NodeId, ReleaseTarget)>,
    /// Nodes whose native drag gesture is blocked.
    drag_blocked: HashSet<NodeId>,
    error_text: Option<String>,
    faults: HashSet<HostOp>,
}

impl MemoryHost {
    /// Resolve the required nodes of `document`.
    pub fn locate(document: MemoryDocument, ids: &ElementIds) -> DragResult<Self> {
        let layout = Layout::resolve(ids, |id| document.find(id))?;
        Ok(Self {
            nodes: document.nodes,
            layout,
            listening: None,
            drag_blocked: HashSet::new(),
            error_text: None,
            faults: HashSet::new(),
        })
    }

    /// A page with the default ids and the given bounds. The error slot is
    /// placed below the zones.
    pub fn standard(source: Rect, grid: Rect, free: Rect) -> Self {
        let ids = ElementIds::default();
        let mut document = MemoryDocument::new();
        let source = document.insert(&ids.source, source);
        let grid = document.insert(&ids.grid, grid);
        let free = document.insert(&ids.free, free);
        let error = document.insert(&ids.error, Rect::ZERO);
        Self {
            nodes: document.nodes,
            layout: Layout {
                source,
                grid,
                free,
                error,
            },
            listening: None,
            drag_blocked: HashSet::new(),
            error_text: None,
            faults: HashSet::new(),
        }
    }

    /// Make every later call of `op` fail.
    pub fn fail(&mut self, op: HostOp) {
        self.faults.insert(op);
    }

    /// Undo [`MemoryHost::fail`].
    pub fn heal(&mut self, op: HostOp) {
        self.faults.remove(&op);
    }

    /// Change a zone's bounds, as a viewport resize would.
    pub fn resize_zone(&mut self, zone: ZoneKind, rect: Rect) {
        let node = *self.layout.zone(zone);
        self.nodes[node.0].rect = rect;
    }

    pub fn layout(&self) -> &Layout<NodeId> {
        &self.layout
    }

    pub fn body(&self) -> NodeId {
        MemoryDocument::BODY
    }

    pub fn zone_node(&self, zone: ZoneKind) -> NodeId {
        *self.layout.zone(zone)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn id_attr(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.nodes[node.0].position
    }

    pub fn background(&self, node: NodeId) -> Option<Color> {
        self.nodes[node.0].background
    }

    /// Whether the node hangs off the body.
    pub fn in_document(&self, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            if parent == MemoryDocument::BODY {
                return true;
            }
            current = parent;
        }
        current == MemoryDocument::BODY
    }

    /// Number of parents that list `node` as a child.
    pub fn parent_count(&self, node: NodeId) -> usize {
        self.nodes.iter().filter(|n| n.children.contains(&node)).count()
    }

    pub fn listening(&self) -> Option<(NodeId, ReleaseTarget)> {
        self.listening
    }

    pub fn is_drag_blocked(&self, node: NodeId) -> bool {
        self.drag_blocked.contains(&node)
    }

    /// Text currently shown in the error slot.
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Nodes of any kind ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn check(&self, op: HostOp) -> DragResult<()> {
        if self.faults.contains(&op) {
            Err(DragError::Host(format!("{:?} failed", op)))
        } else {
            Ok(())
        }
    }

    fn node(&self, node: NodeId) -> DragResult<&Node> {
        self.nodes
            .get(node.0)
            .ok_or_else(|| DragError::Host(format!("unknown node {:?}", node)))
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    fn append_child(&mut self, parent: NodeId, node: NodeId) {
        self.detach(node);
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
    }

    fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let mut copy = self.nodes[node.0].clone();
        copy.parent = None;
        copy.children.clear();
        let clone = NodeId(self.nodes.len());
        self.nodes.push(copy);
        let children = self.nodes[node.0].children.clone();
        for child in children {
            let child_clone = self.deep_clone(child);
            self.nodes[child_clone.0].parent = Some(clone);
            self.nodes[clone.0].children.push(child_clone);
        }
        clone
    }
}

impl DragHost for MemoryHost {
    type Element = NodeId;

    fn source_bounds(&self) -> DragResult<Rect> {
        self.check(HostOp::SourceBounds)?;
        Ok(self.node(self.layout.source)?.rect)
    }

    fn clone_source(&mut self) -> DragResult<NodeId> {
        self.check(HostOp::CloneSource)?;
        let clone = self.deep_clone(self.layout.source);
        let size = self.nodes[clone.0].rect.size();
        let data = &mut self.nodes[clone.0];
        data.id = None;
        data.rect = Rect::from_origin_size(Point::ZERO, size);
        Ok(clone)
    }

    fn paint_source(&mut self, color: Color) -> DragResult<()> {
        self.check(HostOp::PaintSource)?;
        let source = self.layout.source;
        self.nodes[source.0].background = Some(color);
        Ok(())
    }

    fn attach_to_body(&mut self, element: &NodeId) -> DragResult<()> {
        self.check(HostOp::AttachToBody)?;
        self.node(*element)?;
        self.append_child(MemoryDocument::BODY, *element);
        Ok(())
    }

    fn move_element(&mut self, element: &NodeId, position: Point) -> DragResult<()> {
        self.check(HostOp::MoveElement)?;
        self.node(*element)?;
        self.nodes[element.0].position = Some(position);
        Ok(())
    }

    fn set_element_class(&mut self, element: &NodeId, class: &str, enabled: bool) -> DragResult<()> {
        self.check(HostOp::ElementClass)?;
        self.node(*element)?;
        let classes = &mut self.nodes[element.0].classes;
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn remove_element(&mut self, element: &NodeId) -> DragResult<()> {
        self.check(HostOp::RemoveElement)?;
        self.node(*element)?;
        self.detach(*element);
        Ok(())
    }

    fn zone_bounds(&self, zone: ZoneKind) -> DragResult<Rect> {
        self.check(HostOp::ZoneBounds)?;
        Ok(self.node(*self.layout.zone(zone))?.rect)
    }

    fn set_zone_class(&mut self, zone: ZoneKind, class: &str, enabled: bool) -> DragResult<()> {
        self.check(HostOp::ZoneClass)?;
        let node = *self.layout.zone(zone);
        let classes = &mut self.nodes[node.0].classes;
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn zone_overflows(&self, zone: ZoneKind) -> DragResult<bool> {
        self.check(HostOp::ZoneOverflow)?;
        let node = self.node(*self.layout.zone(zone))?;
        // Children stack vertically in flow order.
        let content: f64 = node
            .children
            .iter()
            .map(|child| self.nodes[child.0].rect.height())
            .sum();
        Ok(content > node.rect.height())
    }

    fn append_to_zone(&mut self, zone: ZoneKind, element: &NodeId) -> DragResult<()> {
        self.check(HostOp::AppendToZone)?;
        self.node(*element)?;
        let parent = *self.layout.zone(zone);
        self.append_child(parent, *element);
        Ok(())
    }

    fn listen(&mut self, element: &NodeId, release: ReleaseTarget) -> DragResult<()> {
        self.check(HostOp::Listen)?;
        self.node(*element)?;
        self.drag_blocked.insert(*element);
        let target = match release {
            ReleaseTarget::Clone => *element,
            ReleaseTarget::Source => self.layout.source,
        };
        self.listening = Some((target, release));
        Ok(())
    }

    fn unlisten(&mut self) -> DragResult<()> {
        self.check(HostOp::Unlisten)?;
        self.listening = None;
        Ok(())
    }

    fn report_error(&mut self, message: &str) {
        self.error_text = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        MemoryHost::standard(
            Rect::new(40.0, 40.0, 90.0, 90.0),
            Rect::new(0.0, 100.0, 300.0, 200.0),
            Rect::new(320.0, 100.0, 620.0, 400.0),
        )
    }

    #[test]
    fn test_locate_finds_nodes_by_id() {
        let mut document = MemoryDocument::new();
        document.insert("free", Rect::ZERO);
        document.insert("element", Rect::ZERO);
        document.insert("error", Rect::ZERO);
        document.insert("grid", Rect::ZERO);
        let host = MemoryHost::locate(document, &ElementIds::default()).unwrap();
        assert_eq!(host.id_attr(host.layout().grid), Some("grid"));
        assert_eq!(host.id_attr(host.layout().source), Some("element"));
    }

    #[test]
    fn test_locate_missing_error_slot() {
        let mut document = MemoryDocument::new();
        document.insert("element", Rect::ZERO);
        document.insert("grid", Rect::ZERO);
        document.insert("free", Rect::ZERO);
        let result = MemoryHost::locate(document, &ElementIds::default());
        assert!(matches!(result, Err(DragError::MissingElement(id)) if id == "error"));
    }

    #[test]
    fn test_clone_is_detached_and_anonymous() {
        let mut host = host();
        let clone = host.clone_source().unwrap();
        assert_eq!(host.id_attr(clone), None);
        assert_eq!(host.parent(clone), None);
        assert!(!host.in_document(clone));
        assert_eq!(host.source_bounds().unwrap().size(), host.nodes[clone.0].rect.size());
    }

    #[test]
    fn test_reparenting_keeps_single_parent() {
        let mut host = host();
        let clone = host.clone_source().unwrap();
        host.attach_to_body(&clone).unwrap();
        assert_eq!(host.parent_count(clone), 1);
        host.append_to_zone(ZoneKind::Grid, &clone).unwrap();
        assert_eq!(host.parent_count(clone), 1);
        assert_eq!(host.parent(clone), Some(host.zone_node(ZoneKind::Grid)));
        host.remove_element(&clone).unwrap();
        assert_eq!(host.parent_count(clone), 0);
        assert!(!host.in_document(clone));
    }

    #[test]
    fn test_overflow_tracks_children_and_resize() {
        let mut host = host();
        // Grid is 100 tall, each clone 50.
        for _ in 0..2 {
            let clone = host.clone_source().unwrap();
            host.append_to_zone(ZoneKind::Grid, &clone).unwrap();
        }
        assert!(!host.zone_overflows(ZoneKind::Grid).unwrap());
        host.resize_zone(ZoneKind::Grid, Rect::new(0.0, 100.0, 300.0, 180.0));
        assert!(host.zone_overflows(ZoneKind::Grid).unwrap());
    }

    #[test]
    fn test_fault_injection() {
        let mut host = host();
        host.fail(HostOp::ZoneBounds);
        assert!(matches!(host.zone_bounds(ZoneKind::Free), Err(DragError::Host(_))));
        host.heal(HostOp::ZoneBounds);
        assert!(host.zone_bounds(ZoneKind::Free).is_ok());
    }

    #[test]
    fn test_listen_routes_release_target() {
        let mut host = host();
        let clone = host.clone_source().unwrap();
        host.listen(&clone, ReleaseTarget::Source).unwrap();
        assert_eq!(host.listening(), Some((host.layout().source, ReleaseTarget::Source)));
        assert!(host.is_drag_blocked(clone));
        host.unlisten().unwrap();
        host.listen(&clone, ReleaseTarget::Clone).unwrap();
        assert_eq!(host.listening(), Some((clone, ReleaseTarget::Clone)));
    }
}
