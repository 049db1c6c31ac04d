//! Lookup helpers shared by the page behaviors.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::PageError;

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub fn by_id(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(format!("#{}", id)))
}

pub fn query(root: &Element, selector: &str) -> Result<Element, PageError> {
    root.query_selector(selector)?
        .ok_or_else(|| PageError::MissingElement(selector.to_string()))
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageError> {
    let nodes = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(el);
        }
    }
    Ok(elements)
}

pub fn html_element(element: Element, label: &str) -> Result<HtmlElement, PageError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| PageError::NotHtmlElement(label.to_string()))
}

pub fn set_px(element: &HtmlElement, property: &str, value: f64) -> Result<(), PageError> {
    element
        .style()
        .set_property(property, &format!("{}px", value))?;
    Ok(())
}
