use crate::element::{Element, Style, Tool};
use crate::{Point, BACKGROUND_COLOR};

/// Ordered sequence of committed elements plus the element being drawn.
///
/// The in-progress element is not part of the committed sequence; the
/// renderer paints it last so it previews on top of the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    elements: Vec<Element>,
    pending: Option<Element>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn pending(&self) -> Option<&Element> {
        self.pending.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new in-progress element at `origin`. An erase gesture is a
    /// stroke in the page background color; shape tools start with both
    /// defining points at the origin.
    pub fn begin(&mut self, tool: Tool, origin: Point, style: &Style) {
        let color = match tool {
            Tool::Erase => BACKGROUND_COLOR.to_string(),
            _ => style.color.clone(),
        };
        let width = style.width;
        self.pending = Some(match tool {
            Tool::Draw | Tool::Erase => Element::Stroke {
                points: vec![origin],
                color,
                width,
            },
            Tool::Line => Element::Line {
                start: origin,
                end: origin,
                color,
                width,
            },
            Tool::Rect => Element::Rectangle {
                corner1: origin,
                corner2: origin,
                color,
                width,
            },
            Tool::Circle => Element::Circle {
                center: origin,
                edge: origin,
                color,
                width,
            },
        });
    }

    /// Feed the next pointer position into the in-progress element. Strokes
    /// append every point as delivered (no deduplication); shapes move their
    /// second defining point. No-op when nothing is in progress.
    pub fn extend(&mut self, point: Point) {
        match &mut self.pending {
            Some(Element::Stroke { points, .. }) => points.push(point),
            Some(Element::Line { end, .. }) => *end = point,
            Some(Element::Rectangle { corner2, .. }) => *corner2 = point,
            Some(Element::Circle { edge, .. }) => *edge = point,
            None => {}
        }
    }

    /// Append the in-progress element to the scene and return it. No-op
    /// returning `None` when nothing is in progress. The caller records the
    /// undo snapshot of the pre-commit scene before calling this.
    pub fn commit(&mut self) -> Option<Element> {
        let element = self.pending.take()?;
        self.elements.push(element.clone());
        Some(element)
    }

    /// Drop all committed elements. Clears are not snapshotted.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Replace the committed sequence wholesale, used when undo/redo restores
    /// a snapshot.
    pub fn restore(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(color: &str) -> Style {
        Style {
            color: color.to_string(),
            width: 5.0,
        }
    }

    #[test]
    fn commit_appends_exactly_one_element_per_gesture() {
        let mut scene = Scene::new();
        scene.begin(Tool::Draw, Point::new(1.0, 1.0), &style("#123456"));
        scene.extend(Point::new(2.0, 2.0));
        scene.extend(Point::new(3.0, 3.0));
        let committed = scene.commit().unwrap();
        assert_eq!(scene.elements().len(), 1);
        assert!(matches!(committed, Element::Stroke { .. }));
        assert!(!scene.is_drawing());
    }

    #[test]
    fn commit_variant_matches_tool() {
        let cases = [
            (Tool::Draw, "Stroke"),
            (Tool::Erase, "Stroke"),
            (Tool::Line, "Line"),
            (Tool::Rect, "Rectangle"),
            (Tool::Circle, "Circle"),
        ];
        for (tool, variant) in cases {
            let mut scene = Scene::new();
            scene.begin(tool, Point::new(0.0, 0.0), &style("#000000"));
            let committed = scene.commit().unwrap();
            let got = match committed {
                Element::Stroke { .. } => "Stroke",
                Element::Line { .. } => "Line",
                Element::Rectangle { .. } => "Rectangle",
                Element::Circle { .. } => "Circle",
            };
            assert_eq!(got, variant);
        }
    }

    #[test]
    fn erase_strokes_use_background_color() {
        let mut scene = Scene::new();
        scene.begin(Tool::Erase, Point::new(0.0, 0.0), &style("#ff0000"));
        let committed = scene.commit().unwrap();
        assert_eq!(committed.color(), BACKGROUND_COLOR);
    }

    #[test]
    fn style_is_captured_at_begin_time() {
        let mut scene = Scene::new();
        let mut active = style("#ff0000");
        scene.begin(Tool::Line, Point::new(0.0, 0.0), &active);
        // UI changes the color mid-gesture; in-progress element keeps its own.
        active.color = "#00ff00".to_string();
        let committed = scene.commit().unwrap();
        assert_eq!(committed.color(), "#ff0000");
    }

    #[test]
    fn extend_and_commit_when_idle_are_noops() {
        let mut scene = Scene::new();
        scene.extend(Point::new(1.0, 1.0));
        assert_eq!(scene.commit(), None);
        assert!(scene.elements().is_empty());
    }

    #[test]
    fn stroke_points_append_without_deduplication() {
        let mut scene = Scene::new();
        let p = Point::new(4.0, 4.0);
        scene.begin(Tool::Draw, p, &style("#000000"));
        scene.extend(p);
        scene.extend(p);
        let Some(Element::Stroke { points, .. }) = scene.commit() else {
            panic!("expected stroke");
        };
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn shape_extend_overwrites_second_point() {
        let mut scene = Scene::new();
        scene.begin(Tool::Rect, Point::new(0.0, 0.0), &style("#000000"));
        scene.extend(Point::new(5.0, 5.0));
        scene.extend(Point::new(9.0, 3.0));
        let Some(Element::Rectangle { corner1, corner2, .. }) = scene.commit() else {
            panic!("expected rectangle");
        };
        assert_eq!(corner1, Point::new(0.0, 0.0));
        assert_eq!(corner2, Point::new(9.0, 3.0));
    }

    #[test]
    fn zero_size_shapes_commit_as_valid_elements() {
        let mut scene = Scene::new();
        let p = Point::new(7.0, 7.0);
        scene.begin(Tool::Circle, p, &style("#000000"));
        let Some(Element::Circle { center, edge, .. }) = scene.commit() else {
            panic!("expected circle");
        };
        assert_eq!(center, edge);
        assert_eq!(scene.elements().len(), 1);
    }

    #[test]
    fn clear_empties_committed_elements() {
        let mut scene = Scene::new();
        scene.begin(Tool::Draw, Point::new(0.0, 0.0), &style("#000000"));
        scene.commit();
        scene.clear();
        assert!(scene.elements().is_empty());
    }
}
