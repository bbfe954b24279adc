use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

pub enum PaletteAction {
    Select(usize),
    Remove(usize),
    Add,
}

fn make_button(document: &Document) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
    button.set_attribute("type", "button")?;
    Ok(button)
}

fn make_swatch(
    document: &Document,
    index: usize,
    color: &str,
    active: bool,
) -> Result<HtmlElement, JsValue> {
    let wrapper: HtmlElement = document.create_element("div")?.dyn_into()?;
    wrapper.set_attribute("class", "swatch-wrap")?;

    let swatch = make_button(document)?;
    swatch.set_attribute("data-index", &index.to_string())?;
    swatch.set_attribute("aria-label", &format!("Use color {color}"))?;
    swatch.set_attribute("class", if active { "swatch active" } else { "swatch" })?;
    swatch.style().set_property("background", color)?;
    wrapper.append_child(&swatch)?;

    let remove = make_button(document)?;
    remove.set_attribute("data-action", "remove")?;
    remove.set_attribute("data-index", &index.to_string())?;
    remove.set_attribute("aria-label", "Remove palette color")?;
    remove.set_attribute("class", "swatch-remove")?;
    remove.set_inner_html(
        "<svg viewBox=\"0 0 20 20\" aria-hidden=\"true\"><path d=\"M6 6l8 8M14 6l-8 8\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\"/></svg>",
    );
    wrapper.append_child(&remove)?;

    Ok(wrapper)
}

pub fn render_palette(
    document: &Document,
    palette_el: &HtmlElement,
    colors: &[String],
    selected: usize,
) {
    palette_el.set_inner_html("");
    for (index, color) in colors.iter().enumerate() {
        if let Ok(swatch) = make_swatch(document, index, color, index == selected) {
            let _ = palette_el.append_child(&swatch);
        }
    }
    if let Ok(add) = make_button(document) {
        let _ = add.set_attribute("data-action", "add");
        let _ = add.set_attribute("aria-label", "Add palette color");
        let _ = add.set_attribute("class", "swatch add-swatch");
        add.set_inner_html(
            "<svg viewBox=\"0 0 20 20\" aria-hidden=\"true\"><path d=\"M10 4v12M4 10h12\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\"/></svg>",
        );
        let _ = palette_el.append_child(&add);
    }
}

/// Resolve a click inside the palette to an action by walking up from the
/// event target to the annotated button.
pub fn palette_action_from_event(event: &Event) -> Option<PaletteAction> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        let index = element
            .get_attribute("data-index")
            .and_then(|value| value.parse::<usize>().ok());
        match element.get_attribute("data-action").as_deref() {
            Some("add") => return Some(PaletteAction::Add),
            Some("remove") => return index.map(PaletteAction::Remove),
            _ => {
                if let Some(index) = index {
                    return Some(PaletteAction::Select(index));
                }
            }
        }
        current = element.parent_element();
    }
    None
}
