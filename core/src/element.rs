use crate::Point;

/// Toolbar tools. `Draw` and `Erase` both produce strokes; the rest produce
/// two-point shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Draw,
    Erase,
    Line,
    Rect,
    Circle,
}

/// Stroke style captured when a gesture begins. Changing the inputs
/// mid-gesture does not affect the element already in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub color: String,
    pub width: f64,
}

/// One drawable primitive. Committed elements are immutable; paint order is
/// the order they were committed in.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Stroke {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    Line {
        start: Point,
        end: Point,
        color: String,
        width: f64,
    },
    Rectangle {
        corner1: Point,
        corner2: Point,
        color: String,
        width: f64,
    },
    Circle {
        center: Point,
        edge: Point,
        color: String,
        width: f64,
    },
}

impl Element {
    pub fn color(&self) -> &str {
        match self {
            Element::Stroke { color, .. }
            | Element::Line { color, .. }
            | Element::Rectangle { color, .. }
            | Element::Circle { color, .. } => color,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Element::Stroke { width, .. }
            | Element::Line { width, .. }
            | Element::Rectangle { width, .. }
            | Element::Circle { width, .. } => *width,
        }
    }
}

/// Normalized rectangle extent `(x, y, w, h)` for two opposite corners.
/// The corners may arrive in any order; width and height come out positive
/// (zero for degenerate rectangles).
pub fn rect_extent(corner1: Point, corner2: Point) -> (f64, f64, f64, f64) {
    let x = corner1.x.min(corner2.x);
    let y = corner1.y.min(corner2.y);
    let w = (corner2.x - corner1.x).abs();
    let h = (corner2.y - corner1.y).abs();
    (x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_extent_normalizes_swapped_corners() {
        let a = Point::new(10.0, 40.0);
        let b = Point::new(30.0, 20.0);
        assert_eq!(rect_extent(a, b), rect_extent(b, a));
        assert_eq!(rect_extent(a, b), (10.0, 20.0, 20.0, 20.0));
    }

    #[test]
    fn rect_extent_handles_degenerate_rectangle() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(rect_extent(p, p), (5.0, 5.0, 0.0, 0.0));
    }

    #[test]
    fn circle_radius_is_center_edge_distance() {
        let element = Element::Circle {
            center: Point::new(0.0, 0.0),
            edge: Point::new(6.0, 8.0),
            color: "#1f1f1f".to_string(),
            width: 2.0,
        };
        let Element::Circle { center, edge, .. } = &element else {
            unreachable!();
        };
        assert_eq!(center.distance(*edge), 10.0);
    }
}
