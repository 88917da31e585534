//! Controller configuration: element ids, affordance classes and messages.

use crate::error::{DragError, DragResult, GENERIC_ERROR_MESSAGE};
use crate::zone::ZoneKind;
use serde::{Deserialize, Serialize};

/// Ids of the nodes the controller needs in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// The prototype element that gets cloned on pick-up.
    pub source: String,
    pub grid: String,
    pub free: String,
    /// Slot that receives error messages.
    pub error: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            source: "element".to_string(),
            grid: "grid".to_string(),
            free: "free".to_string(),
            error: "error".to_string(),
        }
    }
}

impl ElementIds {
    /// Id of the node backing a zone.
    pub fn zone(&self, zone: ZoneKind) -> &str {
        match zone {
            ZoneKind::Grid => &self.grid,
            ZoneKind::Free => &self.free,
        }
    }
}

/// Drag controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub ids: ElementIds,
    /// Appended to a zone's id to form its highlight class.
    pub highlight_suffix: String,
    /// Class carried by the clone while it follows the pointer.
    pub in_transit_class: String,
    /// Class set on the grid when its content overflows.
    pub overflow_class: String,
    /// Message written to the error slot when an operation fails.
    pub error_message: String,
    /// Width of the free zone's border, subtracted on insertion.
    pub border_correction: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            highlight_suffix: "_target".to_string(),
            in_transit_class: "element_move".to_string(),
            overflow_class: "grid_scroll".to_string(),
            error_message: GENERIC_ERROR_MESSAGE.to_string(),
            border_correction: 1.0,
        }
    }
}

impl DragConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DragResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DragError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every id and class is usable.
    pub fn validate(&self) -> DragResult<()> {
        let names = [
            ("ids.source", &self.ids.source),
            ("ids.grid", &self.ids.grid),
            ("ids.free", &self.ids.free),
            ("ids.error", &self.ids.error),
            ("in_transit_class", &self.in_transit_class),
            ("overflow_class", &self.overflow_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(DragError::Config(format!("{} must not be empty", field)));
            }
        }
        if self.ids.grid == self.ids.free {
            return Err(DragError::Config("grid and free zones share an id".to_string()));
        }
        if !self.border_correction.is_finite() || self.border_correction < 0.0 {
            return Err(DragError::Config(format!(
                "border_correction must be a non-negative number, got {}",
                self.border_correction
            )));
        }
        Ok(())
    }

    /// Highlight class for a zone, e.g. `grid_target`.
    pub fn highlight_class(&self, zone: ZoneKind) -> String {
        format!("{}{}", self.ids.zone(zone), self.highlight_suffix)
    }
}
