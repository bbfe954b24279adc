use crate::element::Element;

/// Maximum number of undo snapshots to keep.
pub const MAX_HISTORY: usize = 64;

/// Undo/redo stacks of scene snapshots, most recent last.
///
/// A snapshot is the committed element sequence as it was *before* an edit,
/// recorded by the caller just before committing. Undo hands the snapshot
/// back and parks the current scene on the redo stack, so redo restores
/// exactly what undo removed.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo_stack: Vec<Vec<Element>>,
    redo_stack: Vec<Vec<Element>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-edit scene. Any recorded edit invalidates pending redo
    /// states, and the oldest snapshot is dropped once the stack is full.
    pub fn record(&mut self, scene: &[Element]) {
        self.undo_stack.push(scene.to_vec());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent snapshot, parking `current` for redo. Returns
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current.to_vec());
        Some(snapshot)
    }

    /// Inverse of [`undo`](Self::undo). Returns `None` when there is nothing
    /// to redo.
    pub fn redo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current.to_vec());
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, Tool};
    use crate::scene::Scene;
    use crate::Point;

    fn style() -> Style {
        Style {
            color: "#1f1f1f".to_string(),
            width: 5.0,
        }
    }

    /// One full gesture: begin, extend through `points`, snapshot, commit.
    fn gesture(scene: &mut Scene, history: &mut History, tool: Tool, points: &[(f64, f64)]) {
        let origin = Point::new(points[0].0, points[0].1);
        scene.begin(tool, origin, &style());
        for &(x, y) in &points[1..] {
            scene.extend(Point::new(x, y));
        }
        history.record(scene.elements());
        scene.commit();
    }

    #[test]
    fn undo_redo_round_trip_restores_scene() {
        let mut scene = Scene::new();
        let mut history = History::new();
        gesture(&mut scene, &mut history, Tool::Draw, &[(0.0, 0.0), (1.0, 1.0)]);
        gesture(&mut scene, &mut history, Tool::Rect, &[(2.0, 2.0), (8.0, 8.0)]);
        let after_second = scene.elements().to_vec();

        let restored = history.undo(scene.elements()).unwrap();
        scene.restore(restored);
        assert_eq!(scene.elements().len(), 1);

        let restored = history.redo(scene.elements()).unwrap();
        scene.restore(restored);
        assert_eq!(scene.elements(), &after_second[..]);
    }

    #[test]
    fn undo_past_the_bottom_reports_nothing_to_do() {
        let mut scene = Scene::new();
        let mut history = History::new();
        gesture(&mut scene, &mut history, Tool::Draw, &[(0.0, 0.0)]);

        let restored = history.undo(scene.elements()).unwrap();
        scene.restore(restored);
        assert!(scene.elements().is_empty());

        assert_eq!(history.undo(scene.elements()), None);
        assert!(scene.elements().is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn new_commit_invalidates_redo() {
        let mut scene = Scene::new();
        let mut history = History::new();
        gesture(&mut scene, &mut history, Tool::Draw, &[(0.0, 0.0)]);

        let restored = history.undo(scene.elements()).unwrap();
        scene.restore(restored);
        assert!(history.can_redo());

        gesture(&mut scene, &mut history, Tool::Line, &[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(history.redo(scene.elements()), None);
        assert!(!history.can_redo());
    }

    #[test]
    fn line_gesture_survives_undo_redo() {
        let mut scene = Scene::new();
        let mut history = History::new();
        gesture(&mut scene, &mut history, Tool::Line, &[(0.0, 0.0), (10.0, 10.0)]);

        let expected = vec![Element::Line {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 10.0),
            color: "#1f1f1f".to_string(),
            width: 5.0,
        }];
        assert_eq!(scene.elements(), &expected[..]);

        let restored = history.undo(scene.elements()).unwrap();
        scene.restore(restored);
        assert!(scene.elements().is_empty());

        let restored = history.redo(scene.elements()).unwrap();
        scene.restore(restored);
        assert_eq!(scene.elements(), &expected[..]);
    }

    #[test]
    fn history_is_bounded() {
        let mut scene = Scene::new();
        let mut history = History::new();
        for i in 0..(MAX_HISTORY + 10) {
            gesture(&mut scene, &mut history, Tool::Draw, &[(i as f64, 0.0)]);
        }
        let mut undos = 0;
        while let Some(restored) = history.undo(scene.elements()) {
            scene.restore(restored);
            undos += 1;
        }
        assert_eq!(undos, MAX_HISTORY);
        // The oldest snapshots were discarded, so the floor is not empty.
        assert_eq!(scene.elements().len(), 10);
    }
}
