//! Drag controller: pick-up, tracking, zone targeting and drop.

use crate::config::DragConfig;
use crate::error::{DragError, DragResult};
use crate::host::DragHost;
use crate::input::{PointerInput, ReleaseTarget};
use crate::session::DragSession;
use crate::swatch::Palette;
use crate::zone::{self, ZoneKind};
use kurbo::{Point, Vec2};

/// What a release did with the dragged clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was active.
    Idle,
    /// The clone was inserted into a zone.
    Committed(ZoneKind),
    /// The clone was released outside every zone and removed.
    Discarded,
}

/// Drives one drag at a time against a [`DragHost`].
///
/// Host failures never escape: each is logged and reported through
/// [`DragHost::report_error`], and the controller carries on in whatever
/// state the failure left behind.
pub struct DragController<H: DragHost> {
    host: H,
    config: DragConfig,
    session: Option<DragSession<H::Element>>,
    /// Zone carrying the highlight class after the last move.
    highlighted: Option<ZoneKind>,
    palette: Palette,
}

impl<H: DragHost> DragController<H> {
    /// Create a controller with a default palette.
    pub fn new(host: H, config: DragConfig) -> Self {
        Self::with_palette(host, config, Palette::default())
    }

    pub fn with_palette(host: H, config: DragConfig, palette: Palette) -> Self {
        Self {
            host,
            config,
            session: None,
            highlighted: None,
            palette,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession<H::Element>> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn highlighted(&self) -> Option<ZoneKind> {
        self.highlighted
    }

    /// Pick up a clone of the source element.
    ///
    /// Ignored unless the input targets the source. A drag already in
    /// progress is cancelled first. Returns whether a session now exists.
    pub fn begin(&mut self, input: &PointerInput) -> bool {
        if !input.on_source {
            return false;
        }
        if self.session.is_some() {
            self.cancel();
        }

        let element = match self.host.clone_source() {
            Ok(element) => element,
            Err(err) => {
                self.fail(err);
                return false;
            }
        };

        let color = self.palette.next_color();
        let painted = self.host.paint_source(color);
        self.guard(painted);

        let origin = match self.host.source_bounds() {
            Ok(bounds) => bounds.origin(),
            Err(err) => {
                self.fail(err);
                return false;
            }
        };
        let shift = input.client - origin;
        log::debug!("Drag started with shift ({}, {})", shift.x, shift.y);

        self.session = Some(DragSession::new(element, shift));
        let started = self.start(input);
        self.guard(started);
        true
    }

    /// Attach the fresh clone and route pointer events to the controller.
    fn start(&mut self, input: &PointerInput) -> DragResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        self.host
            .set_element_class(&session.element, &self.config.in_transit_class, true)?;
        self.host.attach_to_body(&session.element)?;
        self.host
            .listen(&session.element, ReleaseTarget::for_pointer(input.kind))?;

        let position = session.position_for(input.page);
        session.position = position;
        self.host.move_element(&session.element, position)
    }

    /// Follow the pointer and update zone highlights.
    ///
    /// Returns the zone under the pointer, if any.
    pub fn drag(&mut self, input: &PointerInput) -> Option<ZoneKind> {
        let session = self.session.as_mut()?;
        let position = session.position_for(input.page);
        session.position = position;
        let moved = self.host.move_element(&session.element, position);
        self.guard(moved);

        self.highlight(input.client)
    }

    /// Drop the clone into the zone under the pointer, or discard it.
    pub fn end(&mut self, input: &PointerInput) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::Idle;
        };
        let unlistened = self.host.unlisten();
        self.guard(unlistened);

        let outcome = match self.target(input.client) {
            None => {
                let removed = self.host.remove_element(&session.element);
                self.guard(removed);
                log::debug!("Drag released outside all zones, clone discarded");
                DropOutcome::Discarded
            }
            Some(zone) => {
                self.clear_highlight(zone);
                let inserted = self.insert(zone, &session);
                self.guard(inserted);
                log::debug!("Drag committed to {:?}", zone);
                DropOutcome::Committed(zone)
            }
        };
        self.highlighted = None;
        outcome
    }

    /// Zone under a viewport point, testing zones in priority order.
    ///
    /// Bounds are read from the host on every call. A zone whose bounds
    /// cannot be read is skipped.
    pub fn target(&mut self, client: Point) -> Option<ZoneKind> {
        let mut zones = Vec::with_capacity(ZoneKind::PRIORITY.len());
        for kind in ZoneKind::PRIORITY {
            let bounds = self.host.zone_bounds(kind);
            if let Some(bounds) = self.guard(bounds) {
                zones.push((kind, bounds));
            }
        }
        zone::pick_zone(client, zones)
    }

    /// Toggle the grid's overflow class to match its content height.
    pub fn refresh_overflow(&mut self) {
        let refreshed = self.toggle_overflow();
        self.guard(refreshed);
    }

    fn toggle_overflow(&mut self) -> DragResult<()> {
        let overflows = self.host.zone_overflows(ZoneKind::Grid)?;
        self.host
            .set_zone_class(ZoneKind::Grid, &self.config.overflow_class, overflows)
    }

    /// Clear both zones, then highlight the one under the pointer.
    fn highlight(&mut self, client: Point) -> Option<ZoneKind> {
        for kind in ZoneKind::PRIORITY {
            self.clear_highlight(kind);
        }
        self.highlighted = None;

        let target = self.target(client)?;
        let class = self.config.highlight_class(target);
        let entered = self.host.set_zone_class(target, &class, true);
        if self.guard(entered).is_some() {
            self.highlighted = Some(target);
        }
        Some(target)
    }

    fn clear_highlight(&mut self, zone: ZoneKind) {
        let class = self.config.highlight_class(zone);
        let left = self.host.set_zone_class(zone, &class, false);
        self.guard(left);
    }

    fn insert(&mut self, zone: ZoneKind, session: &DragSession<H::Element>) -> DragResult<()> {
        match zone {
            ZoneKind::Grid => {
                self.host
                    .set_element_class(&session.element, &self.config.in_transit_class, false)?;
                self.host.append_to_zone(ZoneKind::Grid, &session.element)?;
                self.toggle_overflow()
            }
            ZoneKind::Free => {
                let origin = self.host.zone_bounds(ZoneKind::Free)?.origin();
                let border = self.config.border_correction;
                let local = session.position - origin.to_vec2() - Vec2::new(border, border);
                self.host.move_element(&session.element, local)?;
                self.host.append_to_zone(ZoneKind::Free, &session.element)
            }
        }
    }

    /// Abandon the active drag, taking its clone out of the document.
    fn cancel(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        log::debug!("Drag replaced by a new pick-up, previous clone dropped");
        let unlistened = self.host.unlisten();
        self.guard(unlistened);
        if let Some(zone) = self.highlighted.take() {
            self.clear_highlight(zone);
        }
        let removed = self.host.remove_element(&session.element);
        self.guard(removed);
    }

    /// Turn a failure into a user-visible notice.
    fn guard<T>(&mut self, result: DragResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn fail(&mut self, err: DragError) {
        log::warn!("Drag operation failed: {}", err);
        self.host.report_error(&self.config.error_message);
    }
}
