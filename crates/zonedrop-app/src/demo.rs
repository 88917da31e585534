//! Scripted drag session against the in-memory host.

use kurbo::{Point, Rect};
use zonedrop_core::{
    DragConfig, DragController, DropOutcome, MemoryHost, PointerInput, PointerKind,
    ZoneKind,
};

const SOURCE: Rect = Rect::new(20.0, 20.0, 80.0, 80.0);
const GRID: Rect = Rect::new(20.0, 120.0, 320.0, 240.0);
const FREE: Rect = Rect::new(340.0, 120.0, 640.0, 420.0);

/// One scripted gesture.
struct Gesture {
    label: &'static str,
    kind: PointerKind,
    path: &'static [(f64, f64)],
}

const GESTURES: &[Gesture] = &[
    Gesture {
        label: "mouse into grid",
        kind: PointerKind::Mouse,
        path: &[(100.0, 100.0), (150.0, 150.0), (160.0, 180.0)],
    },
    Gesture {
        label: "mouse into free zone",
        kind: PointerKind::Mouse,
        path: &[(200.0, 200.0), (350.0, 200.0), (480.0, 300.0)],
    },
    Gesture {
        label: "mouse across both zones, released outside",
        kind: PointerKind::Mouse,
        path: &[(150.0, 150.0), (500.0, 150.0), (700.0, 500.0)],
    },
    Gesture {
        label: "touch into grid",
        kind: PointerKind::Touch,
        path: &[(60.0, 130.0), (90.0, 200.0)],
    },
    Gesture {
        label: "pen into grid",
        kind: PointerKind::Pen,
        path: &[(200.0, 130.0), (220.0, 140.0)],
    },
];

/// Result of one scripted gesture.
#[derive(Debug, Clone)]
pub struct DemoStep {
    pub label: &'static str,
    pub outcome: DropOutcome,
}

/// Summary of the scripted session.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
    pub grid_children: usize,
    pub free_children: usize,
    pub grid_overflows: bool,
    pub error: Option<String>,
}

/// Replay every gesture on a fresh in-memory page.
pub fn run() -> DemoReport {
    let host = MemoryHost::standard(SOURCE, GRID, FREE);
    let mut controller = DragController::new(host, DragConfig::default());
    let grab = SOURCE.center();

    let mut steps = Vec::with_capacity(GESTURES.len());
    for gesture in GESTURES {
        controller.begin(&PointerInput::at(grab).with_kind(gesture.kind).on_source());

        let mut last = grab;
        for &(x, y) in gesture.path {
            last = Point::new(x, y);
            let zone = controller.drag(&PointerInput::at(last).with_kind(gesture.kind));
            log::debug!("{}: pointer at ({}, {}) over {:?}", gesture.label, x, y, zone);
        }

        let outcome = controller.end(&PointerInput::at(last).with_kind(gesture.kind));
        log::info!("{}: {:?}", gesture.label, outcome);
        steps.push(DemoStep {
            label: gesture.label,
            outcome,
        });
    }

    let host = controller.host();
    let config = controller.config();
    let grid = host.zone_node(ZoneKind::Grid);
    DemoReport {
        steps,
        grid_children: host.children(grid).len(),
        free_children: host.children(host.zone_node(ZoneKind::Free)).len(),
        grid_overflows: host.has_class(grid, &config.overflow_class),
        error: host.error_text().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_outcomes() {
        let report = run();
        let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                DropOutcome::Committed(ZoneKind::Grid),
                DropOutcome::Committed(ZoneKind::Free),
                DropOutcome::Discarded,
                DropOutcome::Committed(ZoneKind::Grid),
                DropOutcome::Committed(ZoneKind::Grid),
            ]
        );
    }

    #[test]
    fn test_demo_final_layout() {
        let report = run();
        assert_eq!(report.grid_children, 3);
        assert_eq!(report.free_children, 1);
        // Three 60px clones in a 120px grid.
        assert!(report.grid_overflows);
        assert_eq!(report.error, None);
    }
}
