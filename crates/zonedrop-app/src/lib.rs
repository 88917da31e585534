//! ZoneDrop Application
//!
//! Binds the drag controller to the browser DOM on WASM, and provides a
//! scripted demo against the in-memory host for native builds.

pub mod demo;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod web;

pub use demo::{DemoReport, DemoStep};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomHost, PointerHandlers};
#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
