//! Physical-pixel geometry used to place the panel on the monitor under the cursor.
//!
//! 用于把面板放到光标所在显示器上的几何计算（物理像素）。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.origin.x), i64::from(self.origin.y));
        px >= x
            && py >= y
            && px < x + i64::from(self.size.width)
            && py < y + i64::from(self.size.height)
    }
}

/// A connected display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub name: Option<String>,
    pub bounds: Rect,
    /// Bounds minus OS chrome (menu bar, dock, taskbar).
    pub work_area: Rect,
    pub is_primary: bool,
}

/// Pick the monitor whose bounds contain `cursor`.
///
/// Falls back to the primary monitor, then to the first one. Returns `None`
/// only when `monitors` is empty.
pub fn monitor_at(monitors: &[MonitorInfo], cursor: Point) -> Option<&MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.bounds.contains(cursor))
        .or_else(|| monitors.iter().find(|m| m.is_primary))
        .or_else(|| monitors.first())
}

/// Top-left position that centers `size` inside `area`.
///
/// A panel larger than the area is pinned to the area's origin on that axis.
pub fn center_in(area: Rect, size: Size) -> Point {
    let axis = |origin: i32, available: u32, wanted: u32| -> i32 {
        let slack = (i64::from(available) - i64::from(wanted)).max(0) / 2;
        (i64::from(origin) + slack) as i32
    };
    Point::new(
        axis(area.origin.x, area.size.width, size.width),
        axis(area.origin.y, area.size.height, size.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: &str, bounds: Rect, is_primary: bool) -> MonitorInfo {
        MonitorInfo {
            name: Some(name.to_string()),
            bounds,
            work_area: bounds,
            is_primary,
        }
    }

    #[test]
    fn picks_monitor_under_cursor() {
        let monitors = vec![
            monitor("left", Rect::new(0, 0, 1920, 1080), true),
            monitor("right", Rect::new(1920, 0, 2560, 1440), false),
        ];
        let hit = monitor_at(&monitors, Point::new(2000, 100)).unwrap();
        assert_eq!(hit.name.as_deref(), Some("right"));
    }

    #[test]
    fn negative_coordinates_are_supported() {
        let monitors = vec![
            monitor("main", Rect::new(0, 0, 1920, 1080), true),
            monitor("above", Rect::new(0, -1080, 1920, 1080), false),
        ];
        let hit = monitor_at(&monitors, Point::new(10, -5)).unwrap();
        assert_eq!(hit.name.as_deref(), Some("above"));
    }

    #[test]
    fn falls_back_to_primary_then_first() {
        let monitors = vec![
            monitor("a", Rect::new(0, 0, 100, 100), false),
            monitor("b", Rect::new(100, 0, 100, 100), true),
        ];
        let hit = monitor_at(&monitors, Point::new(5000, 5000)).unwrap();
        assert_eq!(hit.name.as_deref(), Some("b"));

        let no_primary = vec![monitor("a", Rect::new(0, 0, 100, 100), false)];
        let hit = monitor_at(&no_primary, Point::new(-1, -1)).unwrap();
        assert_eq!(hit.name.as_deref(), Some("a"));

        assert!(monitor_at(&[], Point::default()).is_none());
    }

    #[test]
    fn right_edge_belongs_to_next_monitor() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert!(rect.contains(Point::new(1919, 1079)));
        assert!(!rect.contains(Point::new(1920, 0)));
    }

    #[test]
    fn centers_inside_work_area() {
        let area = Rect::new(1920, 25, 2560, 1415);
        let pos = center_in(area, Size::new(400, 500));
        assert_eq!(pos, Point::new(1920 + 1080, 25 + 457));
    }

    #[test]
    fn oversized_panel_clamps_to_origin() {
        let area = Rect::new(100, 50, 300, 300);
        let pos = center_in(area, Size::new(400, 200));
        assert_eq!(pos, Point::new(100, 100));
    }
}
