//! Drop zones and the targeting test.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A registered drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Flow layout: dropped elements are appended in order.
    Grid,
    /// Absolute layout: dropped elements keep their pointer position.
    Free,
}

impl ZoneKind {
    /// Zones in the order they are tested. The first hit wins.
    pub const PRIORITY: [ZoneKind; 2] = [ZoneKind::Grid, ZoneKind::Free];
}

/// Inclusive point-in-rectangle test. Points on the edge count as inside.
pub fn contains(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Pick the first zone whose bounds contain `point`.
pub fn pick_zone<I>(point: Point, zones: I) -> Option<ZoneKind>
where
    I: IntoIterator<Item = (ZoneKind, Rect)>,
{
    zones
        .into_iter()
        .find(|(_, bounds)| contains(*bounds, point))
        .map(|(zone, _)| zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> [(ZoneKind, Rect); 2] {
        [
            (ZoneKind::Grid, Rect::new(0.0, 100.0, 300.0, 400.0)),
            (ZoneKind::Free, Rect::new(320.0, 100.0, 620.0, 400.0)),
        ]
    }

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(contains(r, Point::new(10.0, 10.0)));
        assert!(contains(r, Point::new(20.0, 20.0)));
        assert!(contains(r, Point::new(15.0, 15.0)));
        assert!(!contains(r, Point::new(20.5, 15.0)));
        assert!(!contains(r, Point::new(15.0, 9.5)));
    }

    #[test]
    fn test_pick_each_zone() {
        assert_eq!(pick_zone(Point::new(150.0, 200.0), zones()), Some(ZoneKind::Grid));
        assert_eq!(pick_zone(Point::new(400.0, 200.0), zones()), Some(ZoneKind::Free));
    }

    #[test]
    fn test_pick_none_outside() {
        assert_eq!(pick_zone(Point::new(310.0, 200.0), zones()), None);
        assert_eq!(pick_zone(Point::new(150.0, 50.0), zones()), None);
        assert_eq!(pick_zone(Point::new(-1.0, -1.0), zones()), None);
    }

    #[test]
    fn test_grid_wins_overlap() {
        let overlapping = [
            (ZoneKind::Grid, Rect::new(0.0, 0.0, 100.0, 100.0)),
            (ZoneKind::Free, Rect::new(50.0, 50.0, 150.0, 150.0)),
        ];
        assert_eq!(pick_zone(Point::new(75.0, 75.0), overlapping), Some(ZoneKind::Grid));
        assert_eq!(pick_zone(Point::new(125.0, 125.0), overlapping), Some(ZoneKind::Free));
    }

    #[test]
    fn test_sweep_across_zones() {
        // Every sampled point resolves to the zone whose bounds hold it.
        for x in (-20..=640).step_by(10) {
            for y in (80..=420).step_by(20) {
                let p = Point::new(x as f64, y as f64);
                let in_grid = contains(zones()[0].1, p);
                let in_free = contains(zones()[1].1, p);
                let expected = if in_grid {
                    Some(ZoneKind::Grid)
                } else if in_free {
                    Some(ZoneKind::Free)
                } else {
                    None
                };
                assert_eq!(pick_zone(p, zones()), expected, "at {:?}", p);
            }
        }
    }
}
