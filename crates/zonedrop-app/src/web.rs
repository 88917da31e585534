//! WebAssembly entry point and event wiring.

use crate::dom::{DomHost, PointerHandlers};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Node, PointerEvent};
use zonedrop_core::{
    DragConfig, DragController, DragError, DragResult, GENERIC_ERROR_MESSAGE, Palette,
    PointerInput, PointerKind,
};

/// Id of an optional `<script type="application/json">` holding a [`DragConfig`].
const CONFIG_NODE_ID: &str = "zonedrop-config";

type SharedController = Rc<RefCell<DragController<DomHost>>>;

/// Read the page's configuration, falling back to defaults.
fn load_config(document: &Document) -> DragResult<DragConfig> {
    let json = document
        .get_element_by_id(CONFIG_NODE_ID)
        .and_then(|node| node.text_content());
    match json {
        Some(json) if !json.trim().is_empty() => DragConfig::from_json(&json),
        _ => Ok(DragConfig::default()),
    }
}

/// Replace the whole page with an error notice.
fn replace_page(document: &Document, message: &str) {
    if let Some(body) = document.body() {
        body.set_inner_html(message);
    }
}

fn pointer_input(event: &PointerEvent, on_source: bool) -> PointerInput {
    PointerInput {
        client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        page: Point::new(f64::from(event.page_x()), f64::from(event.page_y())),
        kind: PointerKind::from_dom(&event.pointer_type()),
        on_source,
    }
}

/// Run `f` on the controller unless it is already handling an event.
fn dispatch(controller: &SharedController, f: impl FnOnce(&mut DragController<DomHost>)) {
    match controller.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => log::warn!("Pointer event dropped: controller busy"),
    }
}

fn start() -> DragResult<()> {
    let window = web_sys::window().ok_or_else(|| DragError::Host("No window object".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| DragError::Host("No document".to_string()))?;

    let config = match load_config(&document) {
        Ok(config) => config,
        Err(err) => {
            replace_page(&document, GENERIC_ERROR_MESSAGE);
            return Err(err);
        }
    };
    let host = match DomHost::locate(&document, &config) {
        Ok(host) => host,
        Err(err) => {
            replace_page(&document, &config.error_message);
            return Err(err);
        }
    };

    let source = host.source().clone();
    let grid = host.grid().clone();
    let palette = Palette::seeded((js_sys::Math::random() * f64::from(u32::MAX)) as u32);
    let controller: SharedController = Rc::new(RefCell::new(DragController::with_palette(
        host, config, palette,
    )));

    // Move and release listeners are attached per drag by the host.
    let on_move = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            dispatch(&controller, |c| {
                c.drag(&pointer_input(&event, false));
            });
        }) as Box<dyn FnMut(_)>)
    };
    let on_release = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            dispatch(&controller, |c| {
                let outcome = c.end(&pointer_input(&event, false));
                log::debug!("Drag finished: {:?}", outcome);
            });
        }) as Box<dyn FnMut(_)>)
    };
    controller.borrow_mut().host_mut().set_handlers(PointerHandlers {
        on_move: on_move.as_ref().unchecked_ref::<js_sys::Function>().clone(),
        on_release: on_release.as_ref().unchecked_ref::<js_sys::Function>().clone(),
    });
    on_move.forget();
    on_release.forget();

    let on_down = {
        let controller = controller.clone();
        let source = source.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            let on_source = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| source.contains(Some(&node)));
            dispatch(&controller, |c| {
                c.begin(&pointer_input(&event, on_source));
            });
        }) as Box<dyn FnMut(_)>)
    };
    source
        .add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref())
        .map_err(|e| DragError::Host(format!("addEventListener(pointerdown): {:?}", e)))?;
    on_down.forget();

    let on_resize = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move || {
            dispatch(&controller, |c| c.refresh_overflow());
        }) as Box<dyn FnMut()>)
    };
    let observer = web_sys::ResizeObserver::new(on_resize.as_ref().unchecked_ref())
        .map_err(|e| DragError::Host(format!("ResizeObserver: {:?}", e)))?;
    observer.observe(&grid);
    on_resize.forget();

    Ok(())
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger unavailable: {}", err).into());
    }

    log::info!("Starting ZoneDrop (WASM)");

    if let Err(err) = start() {
        log::error!("ZoneDrop failed to start: {}", err);
    }
}
