//! ZoneDrop Core Library
//!
//! Platform-agnostic drag-and-drop between a flow "grid" zone and an
//! absolutely positioned "free" zone. The controller talks to the document
//! only through [`DragHost`], so the same logic drives the browser DOM and
//! the in-memory host used by tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod input;
pub mod session;
pub mod swatch;
pub mod zone;

pub use config::{DragConfig, ElementIds};
pub use controller::{DragController, DropOutcome};
pub use error::{DragError, DragResult, GENERIC_ERROR_MESSAGE};
pub use host::{DragHost, HostOp, Layout, MemoryDocument, MemoryHost, NodeId};
pub use input::{PointerInput, PointerKind, ReleaseTarget};
pub use session::DragSession;
pub use swatch::{Palette, to_css_hex};
pub use zone::ZoneKind;
