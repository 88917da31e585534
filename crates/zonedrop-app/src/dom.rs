//! Browser DOM host backed by `web-sys`.

use js_sys::Function;
use kurbo::{Point, Rect};
use peniko::Color;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement};
use zonedrop_core::{
    DragConfig, DragError, DragHost, DragResult, Layout, ReleaseTarget, ZoneKind, to_css_hex,
};

/// Callbacks that receive pointer events while a drag is active.
pub struct PointerHandlers {
    pub on_move: Function,
    pub on_release: Function,
}

/// [`DragHost`] over the live page.
///
/// Note: not Send/Sync; WASM is single-threaded and DOM handles stay on the
/// UI thread.
pub struct DomHost {
    document: Document,
    layout: Layout<HtmlElement>,
    handlers: Option<PointerHandlers>,
    /// Node currently holding the `pointerup` listener.
    release_node: Option<EventTarget>,
    block_native_drag: Closure<dyn Fn(web_sys::Event)>,
}

fn js_error(context: &'static str) -> impl Fn(JsValue) -> DragError {
    move |e| DragError::Host(format!("{}: {:?}", context, e))
}

fn bounds_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

fn toggle_class(element: &Element, class: &str, enabled: bool) -> DragResult<()> {
    let classes = element.class_list();
    if enabled {
        classes.add_1(class).map_err(js_error("classList.add"))
    } else {
        classes.remove_1(class).map_err(js_error("classList.remove"))
    }
}

impl DomHost {
    /// Find the required nodes in `document`.
    pub fn locate(document: &Document, config: &DragConfig) -> DragResult<Self> {
        let layout = Layout::resolve(&config.ids, |id| {
            document
                .get_element_by_id(id)
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        })?;

        let block_native_drag = Closure::wrap(Box::new(|event: web_sys::Event| {
            event.prevent_default();
        }) as Box<dyn Fn(_)>);

        Ok(Self {
            document: document.clone(),
            layout,
            handlers: None,
            release_node: None,
            block_native_drag,
        })
    }

    pub fn source(&self) -> &HtmlElement {
        &self.layout.source
    }

    pub fn grid(&self) -> &HtmlElement {
        &self.layout.grid
    }

    /// Install the callbacks registered by [`DragHost::listen`].
    pub fn set_handlers(&mut self, handlers: PointerHandlers) {
        self.handlers = Some(handlers);
    }

    fn handlers(&self) -> DragResult<&PointerHandlers> {
        self.handlers
            .as_ref()
            .ok_or_else(|| DragError::Host("Pointer handlers not installed".to_string()))
    }
}

impl DragHost for DomHost {
    type Element = HtmlElement;

    fn source_bounds(&self) -> DragResult<Rect> {
        Ok(bounds_of(&self.layout.source))
    }

    fn clone_source(&mut self) -> DragResult<HtmlElement> {
        let node = self
            .layout
            .source
            .clone_node_with_deep(true)
            .map_err(js_error("cloneNode"))?;
        let clone: HtmlElement = node
            .dyn_into()
            .map_err(|_| DragError::Host("Clone is not an HTML element".to_string()))?;
        clone.remove_attribute("id").map_err(js_error("removeAttribute"))?;
        Ok(clone)
    }

    fn paint_source(&mut self, color: Color) -> DragResult<()> {
        self.layout
            .source
            .style()
            .set_property("background-color", &to_css_hex(color))
            .map_err(js_error("style.backgroundColor"))
    }

    fn attach_to_body(&mut self, element: &HtmlElement) -> DragResult<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| DragError::Host("Document has no body".to_string()))?;
        body.append_child(element).map_err(js_error("body.append"))?;
        Ok(())
    }

    fn move_element(&mut self, element: &HtmlElement, position: Point) -> DragResult<()> {
        let style = element.style();
        style
            .set_property("left", &format!("{}px", position.x))
            .map_err(js_error("style.left"))?;
        style
            .set_property("top", &format!("{}px", position.y))
            .map_err(js_error("style.top"))
    }

    fn set_element_class(&mut self, element: &HtmlElement, class: &str, enabled: bool) -> DragResult<()> {
        toggle_class(element, class, enabled)
    }

    fn remove_element(&mut self, element: &HtmlElement) -> DragResult<()> {
        element.remove();
        Ok(())
    }

    fn zone_bounds(&self, zone: ZoneKind) -> DragResult<Rect> {
        Ok(bounds_of(self.layout.zone(zone)))
    }

    fn set_zone_class(&mut self, zone: ZoneKind, class: &str, enabled: bool) -> DragResult<()> {
        toggle_class(self.layout.zone(zone), class, enabled)
    }

    fn zone_overflows(&self, zone: ZoneKind) -> DragResult<bool> {
        let element = self.layout.zone(zone);
        Ok(element.scroll_height() > element.client_height())
    }

    fn append_to_zone(&mut self, zone: ZoneKind, element: &HtmlElement) -> DragResult<()> {
        self.layout
            .zone(zone)
            .append_child(element)
            .map_err(js_error("zone.append"))?;
        Ok(())
    }

    fn listen(&mut self, element: &HtmlElement, release: ReleaseTarget) -> DragResult<()> {
        element
            .add_event_listener_with_callback(
                "dragstart",
                self.block_native_drag.as_ref().unchecked_ref(),
            )
            .map_err(js_error("addEventListener(dragstart)"))?;

        let handlers = self.handlers()?;
        self.document
            .add_event_listener_with_callback("pointermove", &handlers.on_move)
            .map_err(js_error("addEventListener(pointermove)"))?;

        let target: EventTarget = match release {
            ReleaseTarget::Clone => element.clone().unchecked_into(),
            ReleaseTarget::Source => self.layout.source.clone().unchecked_into(),
        };
        target
            .add_event_listener_with_callback("pointerup", &handlers.on_release)
            .map_err(js_error("addEventListener(pointerup)"))?;
        self.release_node = Some(target);
        Ok(())
    }

    fn unlisten(&mut self) -> DragResult<()> {
        let handlers = self.handlers()?;
        self.document
            .remove_event_listener_with_callback("pointermove", &handlers.on_move)
            .map_err(js_error("removeEventListener(pointermove)"))?;
        if let Some(node) = &self.release_node {
            node.remove_event_listener_with_callback("pointerup", &handlers.on_release)
                .map_err(js_error("removeEventListener(pointerup)"))?;
        }
        self.release_node = None;
        Ok(())
    }

    fn report_error(&mut self, message: &str) {
        self.layout.error.set_inner_html(message);
    }
}
