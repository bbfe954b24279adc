use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlSpanElement, PointerEvent, Window,
};

use doodlepad_core::{inside_page, normalize_point, Point, Tool, PAGE_HEIGHT, PAGE_WIDTH};

use crate::render::redraw;
use crate::state::State;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn update_size_label(input: &HtmlInputElement, value: &HtmlSpanElement) {
    value.set_text_content(Some(&input.value()));
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_canvas_cursor(canvas: &HtmlCanvasElement, tool: Tool) {
    let cursor = match tool {
        Tool::Erase => "cell",
        _ => "crosshair",
    };
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("cursor", cursor);
    }
}

pub fn set_status(status_el: &Element, status_text: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_text.set_text_content(Some(text));
}

/// Fit the canvas to the window at device-pixel-ratio resolution, recenter
/// the page, and repaint the whole scene at the new size.
pub fn resize_canvas(window: &Window, state: &mut State) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let dpr = window.device_pixel_ratio();

    state.canvas.set_width((width * dpr) as u32);
    state.canvas.set_height((height * dpr) as u32);
    let style = state.canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
    let _ = state.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

    state.board_width = width;
    state.board_height = height;
    state.page_x = (width - PAGE_WIDTH) / 2.0;
    state.page_y = (height - PAGE_HEIGHT) / 2.0;

    redraw(state);
}

/// Page-local coordinates of a pointer event. `None` when the coordinates
/// are unresolvable or fall outside the page; callers treat that as a no-op.
pub fn event_to_point(state: &State, event: &PointerEvent) -> Option<Point> {
    let rect = state.canvas.get_bounding_client_rect();
    let x = event.client_x() as f64 - rect.left() - state.page_x;
    let y = event.client_y() as f64 - rect.top() - state.page_y;
    let point = normalize_point(Point::new(x, y))?;
    if !inside_page(point) {
        return None;
    }
    Some(point)
}
