use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use doodlepad_core::{History, Scene, Style, Tool};

pub const DEFAULT_PALETTE: [&str; 3] = ["#1f1f1f", "#2f6fde", "#e46b49"];
pub const DEFAULT_SIZE: f64 = 5.0;

/// All mutable app state, owned by a single `Rc<RefCell<State>>` and touched
/// only from event closures on the main thread.
pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub scene: Scene,
    pub history: History,
    pub tool: Tool,
    pub size: f64,
    pub palette: Vec<String>,
    pub palette_selected: usize,
    pub board_width: f64,
    pub board_height: f64,
    pub page_x: f64,
    pub page_y: f64,
    /// Pointer id of the gesture in flight, if any. At most one gesture is
    /// active at a time; other pointers are ignored while it runs.
    pub active_pointer: Option<i32>,
}

impl State {
    pub fn active_color(&self) -> &str {
        self.palette
            .get(self.palette_selected)
            .map(String::as_str)
            .unwrap_or(DEFAULT_PALETTE[0])
    }

    /// Style for the next gesture; captured once at begin time.
    pub fn style(&self) -> Style {
        Style {
            color: self.active_color().to_string(),
            width: self.size,
        }
    }
}

pub fn sanitize_size(size: f64) -> f64 {
    let size = if size.is_finite() { size } else { DEFAULT_SIZE };
    size.clamp(1.0, 60.0)
}
