use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlIFrameElement};

use doodlepad_core::{Element, BACKGROUND_COLOR, PAGE_HEIGHT, PAGE_WIDTH};

use crate::render::render_scene;

/// Suggested file name for the printed document (browsers derive the PDF
/// name from the page title).
pub const EXPORT_TITLE: &str = "doodlepad";

/// Rasterize the committed scene to an off-screen canvas of the page's pixel
/// dimensions and return it as a PNG data URL. Reads the scene only.
pub fn rasterize_page(document: &Document, elements: &[Element]) -> Result<String, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(PAGE_WIDTH as u32);
    canvas.set_height(PAGE_HEIGHT as u32);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing export context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
    render_scene(&ctx, elements, None);
    canvas.to_data_url_with_type("image/png")
}

fn build_print_html(data_url: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\" /><title>{title}</title>\
         <style>@page{{margin:0;size:{width}px {height}px;}}html,body{{margin:0;padding:0;}}\
         img{{display:block;width:100%;height:auto;}}</style></head>\
         <body><img src=\"{data_url}\" alt=\"\" /></body></html>",
        title = EXPORT_TITLE,
        width = PAGE_WIDTH,
        height = PAGE_HEIGHT,
        data_url = data_url
    )
}

fn open_print_frame(document: &Document, html: &str) -> Result<(), JsValue> {
    let iframe: HtmlIFrameElement = document.create_element("iframe")?.dyn_into()?;
    iframe.set_attribute(
        "style",
        "position:fixed;right:0;bottom:0;width:0;height:0;border:0;",
    )?;
    iframe.set_srcdoc(html);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing document body"))?;
    body.append_child(&iframe)?;

    let frame = iframe.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if let Some(window) = frame.content_window() {
            let _ = window.focus();
            let _ = window.print();
        }
    });
    iframe.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    Ok(())
}

/// Composite the rendered page into a single-page printable document and
/// hand it to the browser's print pipeline.
pub fn export_pdf(document: &Document, elements: &[Element]) -> Result<(), JsValue> {
    let data_url = rasterize_page(document, elements)?;
    let html = build_print_html(&data_url);
    open_print_frame(document, &html)
}
