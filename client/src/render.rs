use web_sys::CanvasRenderingContext2d;

use doodlepad_core::{rect_extent, Element, Point, BACKGROUND_COLOR, PAGE_HEIGHT, PAGE_WIDTH};

use crate::state::State;

pub const BACKDROP_COLOR: &str = "#0b1f40";

const TAU: f64 = std::f64::consts::PI * 2.0;

fn draw_dot(ctx: &CanvasRenderingContext2d, point: Point, color: &str, width: f64) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(point.x, point.y, width / 2.0, 0.0, TAU);
    ctx.fill();
}

pub fn draw_element(ctx: &CanvasRenderingContext2d, element: &Element) {
    ctx.set_stroke_style_str(element.color());
    ctx.set_line_width(element.width());
    match element {
        Element::Stroke {
            points,
            color,
            width,
        } => {
            let Some(first) = points.first() else {
                return;
            };
            if points.len() == 1 {
                // A tap leaves a dot; a one-point polyline would paint nothing.
                draw_dot(ctx, *first, color, *width);
                return;
            }
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for point in &points[1..] {
                ctx.line_to(point.x, point.y);
            }
            ctx.stroke();
        }
        Element::Line { start, end, .. } => {
            ctx.begin_path();
            ctx.move_to(start.x, start.y);
            ctx.line_to(end.x, end.y);
            ctx.stroke();
        }
        Element::Rectangle {
            corner1, corner2, ..
        } => {
            let (x, y, w, h) = rect_extent(*corner1, *corner2);
            ctx.stroke_rect(x, y, w, h);
        }
        Element::Circle { center, edge, .. } => {
            ctx.begin_path();
            let _ = ctx.arc(center.x, center.y, center.distance(*edge), 0.0, TAU);
            ctx.stroke();
        }
    }
}

/// Paint the committed sequence in order, then the preview element on top so
/// it reflects live input. Shared by the screen and export paths.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    elements: &[Element],
    preview: Option<&Element>,
) {
    for element in elements {
        draw_element(ctx, element);
    }
    if let Some(element) = preview {
        draw_element(ctx, element);
    }
}

/// Full clear-and-redraw: backdrop, white page, every committed element,
/// preview last. No incremental repaint; scenes stay interactive-small.
pub fn redraw(state: &State) {
    let ctx = &state.ctx;
    ctx.clear_rect(0.0, 0.0, state.board_width, state.board_height);
    ctx.set_fill_style_str(BACKDROP_COLOR);
    ctx.fill_rect(0.0, 0.0, state.board_width, state.board_height);
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(state.page_x, state.page_y, PAGE_WIDTH, PAGE_HEIGHT);

    ctx.save();
    let _ = ctx.translate(state.page_x, state.page_y);
    ctx.begin_path();
    ctx.rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
    ctx.clip();
    render_scene(ctx, state.scene.elements(), state.scene.pending());
    ctx.restore();
}
