pub mod element;
pub mod history;
pub mod scene;

pub use element::{rect_extent, Element, Style, Tool};
pub use history::History;
pub use scene::Scene;

/// CSS size of the white drawing page, in CSS pixels.
pub const PAGE_WIDTH: f64 = 600.0;
pub const PAGE_HEIGHT: f64 = 800.0;

/// Fill color of the page; the erase tool draws strokes in this color.
pub const BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

/// True when a page-local point lies on the drawing page.
pub fn inside_page(point: Point) -> bool {
    point.x >= 0.0 && point.x <= PAGE_WIDTH && point.y >= 0.0 && point.y <= PAGE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        assert!(normalize_point(Point::new(f64::NAN, 0.0)).is_none());
        assert!(normalize_point(Point::new(0.0, f64::INFINITY)).is_none());
        assert!(normalize_point(Point::new(1.0, 2.0)).is_some());
    }

    #[test]
    fn page_bounds_are_inclusive() {
        assert!(inside_page(Point::new(0.0, 0.0)));
        assert!(inside_page(Point::new(PAGE_WIDTH, PAGE_HEIGHT)));
        assert!(!inside_page(Point::new(-1.0, 10.0)));
        assert!(!inside_page(Point::new(10.0, PAGE_HEIGHT + 1.0)));
    }
}
