use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, HtmlSpanElement, KeyboardEvent, PointerEvent,
};

use doodlepad_core::{History, Scene, Tool};

use crate::dom::{
    event_to_point, get_element, resize_canvas, set_canvas_cursor, set_status, set_tool_button,
    update_size_label,
};
use crate::export::export_pdf;
use crate::palette::{palette_action_from_event, render_palette, PaletteAction};
use crate::render::redraw;
use crate::state::{sanitize_size, State, DEFAULT_PALETTE, DEFAULT_SIZE};

fn debug_enabled(window: &web_sys::Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

/// Expand a pointer-move event into the coalesced events the browser batched
/// into it, when `getCoalescedEvents` is available. Every coalesced move
/// appends a point to the in-progress stroke.
fn coalesced_pointer_events(event: &PointerEvent) -> Vec<PointerEvent> {
    let getter = Reflect::get(event.as_ref(), &JsValue::from_str("getCoalescedEvents"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let mut out = Vec::new();
    if let Some(getter) = getter {
        if let Ok(events) = getter
            .call0(event.as_ref())
            .and_then(|value| value.dyn_into::<js_sys::Array>())
        {
            for index in 0..events.length() {
                if let Ok(event) = events.get(index).dyn_into::<PointerEvent>() {
                    out.push(event);
                }
            }
        }
    }
    if out.is_empty() {
        out.push(event.clone());
    }
    out
}

#[derive(Clone)]
struct ToolButtons {
    draw: HtmlButtonElement,
    erase: HtmlButtonElement,
    line: HtmlButtonElement,
    rect: HtmlButtonElement,
    circle: HtmlButtonElement,
}

impl ToolButtons {
    fn sync(&self, active: Tool) {
        set_tool_button(&self.draw, active == Tool::Draw);
        set_tool_button(&self.erase, active == Tool::Erase);
        set_tool_button(&self.line, active == Tool::Line);
        set_tool_button(&self.rect, active == Tool::Rect);
        set_tool_button(&self.circle, active == Tool::Circle);
    }
}

fn wire_tool_button(
    button: &HtmlButtonElement,
    tool: Tool,
    state: Rc<RefCell<State>>,
    buttons: ToolButtons,
) -> Result<(), JsValue> {
    let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
        let mut state = state.borrow_mut();
        state.tool = tool;
        buttons.sync(tool);
        set_canvas_cursor(&state.canvas, tool);
    });
    button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}

fn perform_undo(state: &mut State) -> bool {
    let Some(snapshot) = state.history.undo(state.scene.elements()) else {
        return false;
    };
    state.scene.restore(snapshot);
    true
}

fn perform_redo(state: &mut State) -> bool {
    let Some(snapshot) = state.history.redo(state.scene.elements()) else {
        return false;
    };
    state.scene.restore(snapshot);
    true
}

/// Finish the active gesture: snapshot the pre-commit scene, then commit.
fn finish_gesture(state: &mut State) {
    if !state.scene.is_drawing() {
        return;
    }
    state.history.record(state.scene.elements());
    state.scene.commit();
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    if document_ready_state(&document).as_deref() == Some("complete") {
        return start_app();
    }

    let started = Rc::new(Cell::new(false));
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let debug = debug_enabled(&window);

    let canvas: HtmlCanvasElement = get_element(&document, "pad")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let draw_button: HtmlButtonElement = get_element(&document, "draw")?;
    let erase_button: HtmlButtonElement = get_element(&document, "erase")?;
    let line_button: HtmlButtonElement = get_element(&document, "line")?;
    let rect_button: HtmlButtonElement = get_element(&document, "rect")?;
    let circle_button: HtmlButtonElement = get_element(&document, "circle")?;
    let color_input: HtmlInputElement = get_element(&document, "color")?;
    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let size_input: HtmlInputElement = get_element(&document, "size")?;
    let size_value: HtmlSpanElement = get_element(&document, "sizeValue")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let undo_button: HtmlButtonElement = get_element(&document, "undo")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redo")?;
    let pdf_button: HtmlButtonElement = get_element(&document, "pdf")?;
    let status_el = document
        .get_element_by_id("status")
        .ok_or_else(|| JsValue::from_str("Missing status element"))?;
    let status_text = document
        .get_element_by_id("statusText")
        .ok_or_else(|| JsValue::from_str("Missing status text"))?;

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        scene: Scene::new(),
        history: History::new(),
        tool: Tool::Draw,
        size: DEFAULT_SIZE,
        palette: DEFAULT_PALETTE
            .iter()
            .map(|value| value.to_string())
            .collect(),
        palette_selected: 0,
        board_width: 0.0,
        board_height: 0.0,
        page_x: 0.0,
        page_y: 0.0,
        active_pointer: None,
    }));

    let tool_buttons = ToolButtons {
        draw: draw_button.clone(),
        erase: erase_button.clone(),
        line: line_button.clone(),
        rect: rect_button.clone(),
        circle: circle_button.clone(),
    };

    update_size_label(&size_input, &size_value);
    set_status(&status_el, &status_text, "ready", "Ready");
    tool_buttons.sync(Tool::Draw);
    set_canvas_cursor(&canvas, Tool::Draw);
    {
        let state = state.borrow();
        color_input.set_value(state.active_color());
        render_palette(&document, &palette_el, &state.palette, state.palette_selected);
    }

    {
        let mut state = state.borrow_mut();
        resize_canvas(&window, &mut state);
    }

    wire_tool_button(&draw_button, Tool::Draw, state.clone(), tool_buttons.clone())?;
    wire_tool_button(&erase_button, Tool::Erase, state.clone(), tool_buttons.clone())?;
    wire_tool_button(&line_button, Tool::Line, state.clone(), tool_buttons.clone())?;
    wire_tool_button(&rect_button, Tool::Rect, state.clone(), tool_buttons.clone())?;
    wire_tool_button(&circle_button, Tool::Circle, state.clone(), tool_buttons.clone())?;

    {
        let resize_state = state.clone();
        let window_cb = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let mut state = resize_state.borrow_mut();
            if debug {
                web_sys::console::log_1(
                    &format!(
                        "Resizing canvas from {}x{}",
                        state.board_width, state.board_height
                    )
                    .into(),
                );
            }
            resize_canvas(&window_cb, &mut state);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let key_state = state.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let modifier = event.meta_key() || event.ctrl_key();
            if !modifier {
                return;
            }
            let mut state = key_state.borrow_mut();
            let changed = if key.eq_ignore_ascii_case("z") {
                if event.shift_key() {
                    perform_redo(&mut state)
                } else {
                    perform_undo(&mut state)
                }
            } else if key.eq_ignore_ascii_case("y") {
                perform_redo(&mut state)
            } else {
                return;
            };
            event.prevent_default();
            if changed {
                redraw(&state);
            }
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let size_input_cb = size_input.clone();
        let size_value_cb = size_value.clone();
        let size_state = state.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            update_size_label(&size_input_cb, &size_value_cb);
            let size = size_input_cb.value().parse::<f64>().unwrap_or(DEFAULT_SIZE);
            size_state.borrow_mut().size = sanitize_size(size);
        });
        size_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let color_state = state.clone();
        let color_input_cb = color_input.clone();
        let palette_el_cb = palette_el.clone();
        let document_cb = document.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = color_state.borrow_mut();
            let selected = state.palette_selected;
            let color = color_input_cb.value();
            if let Some(entry) = state.palette.get_mut(selected) {
                *entry = color;
            }
            render_palette(&document_cb, &palette_el_cb, &state.palette, selected);
        });
        color_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let palette_state = state.clone();
        let palette_el_cb = palette_el.clone();
        let color_input_cb = color_input.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(action) = palette_action_from_event(&event) else {
                return;
            };
            let mut state = palette_state.borrow_mut();
            match action {
                PaletteAction::Select(index) => {
                    if index >= state.palette.len() {
                        return;
                    }
                    state.palette_selected = index;
                }
                PaletteAction::Add => {
                    state.palette.push(color_input_cb.value());
                    state.palette_selected = state.palette.len() - 1;
                }
                PaletteAction::Remove(index) => {
                    // Keep at least one swatch.
                    if state.palette.len() <= 1 || index >= state.palette.len() {
                        return;
                    }
                    state.palette.remove(index);
                    if state.palette_selected >= state.palette.len()
                        || state.palette_selected > index
                    {
                        state.palette_selected = state.palette_selected.saturating_sub(1);
                    }
                }
            }
            color_input_cb.set_value(state.active_color());
            render_palette(
                &document_cb,
                &palette_el_cb,
                &state.palette,
                state.palette_selected,
            );
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let clear_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = clear_state.borrow_mut();
            state.scene.clear();
            redraw(&state);
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let undo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = undo_state.borrow_mut();
            if perform_undo(&mut state) {
                redraw(&state);
            }
        });
        undo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let redo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = redo_state.borrow_mut();
            if perform_redo(&mut state) {
                redraw(&state);
            }
        });
        redo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let pdf_state = state.clone();
        let document_cb = document.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state = pdf_state.borrow();
            match export_pdf(&document_cb, state.scene.elements()) {
                Ok(()) => set_status(&status_el_cb, &status_text_cb, "ready", "Ready"),
                Err(err) => {
                    web_sys::console::error_1(&err);
                    set_status(&status_el_cb, &status_text_cb, "error", "Export failed");
                }
            }
        });
        pdf_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let mut state = down_state.borrow_mut();
            if state.active_pointer.is_some() {
                return;
            }
            let Some(point) = event_to_point(&state, &event) else {
                return;
            };
            event.prevent_default();
            let _ = down_canvas.set_pointer_capture(event.pointer_id());
            state.active_pointer = Some(event.pointer_id());
            let tool = state.tool;
            let style = state.style();
            state.scene.begin(tool, point, &style);
            redraw(&state);
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if state.active_pointer != Some(event.pointer_id()) || !state.scene.is_drawing() {
                return;
            }
            event.prevent_default();
            let mut extended = false;
            for event in coalesced_pointer_events(&event) {
                if let Some(point) = event_to_point(&state, &event) {
                    state.scene.extend(point);
                    extended = true;
                }
            }
            if extended {
                redraw(&state);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = up_state.borrow_mut();
            if state.active_pointer != Some(event.pointer_id()) {
                return;
            }
            state.active_pointer = None;
            finish_gesture(&mut state);
            redraw(&state);
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("pointercancel", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    Ok(())
}
