//! In-page anchor scrolling and the registration buttons.

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::error::PageError;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const REGISTER_SECTION_ID: &str = "register";
pub const SCROLL_TO_REGISTER: &str = ".register-btn, #apply-team, #register-scroll";
pub const OPENS_FORM: &str = ".register-btn";

/// Id an in-page link points at. A bare `#` points nowhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn smooth_scroll_to(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn on_click<F>(element: &Element, handler: F) -> Result<(), PageError>
where
    F: FnMut(MouseEvent) + 'static,
{
    let listener = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

pub fn setup_anchors(document: &Document) -> Result<(), PageError> {
    let links = dom::query_all(document, ANCHOR_SELECTOR)?;
    for link in &links {
        let link_el = link.clone();
        let document = document.clone();
        on_click(link, move |e: MouseEvent| {
            let href = link_el.get_attribute("href").unwrap_or_default();
            // Unknown ids fall through to the browser's own jump.
            let target = anchor_target(&href).and_then(|id| document.get_element_by_id(id));
            if let Some(target) = target {
                e.prevent_default();
                smooth_scroll_to(&target);
            }
        })?;
    }
    info!("Smooth scrolling for {} in-page link(s)", links.len());
    Ok(())
}

pub fn setup_register_buttons(document: &Document, form_url: &str) -> Result<(), PageError> {
    let scrollers = dom::query_all(document, SCROLL_TO_REGISTER)?;
    for button in &scrollers {
        let document = document.clone();
        on_click(button, move |_| {
            // Looked up per click, the section may be rendered late.
            match document.get_element_by_id(REGISTER_SECTION_ID) {
                Some(section) => smooth_scroll_to(&section),
                None => debug!("No #{} section to scroll to", REGISTER_SECTION_ID),
            }
        })?;
    }

    let openers = dom::query_all(document, OPENS_FORM)?;
    for button in &openers {
        let form_url = form_url.to_string();
        on_click(button, move |_| {
            let opened = dom::window()
                .and_then(|w| Ok(w.open_with_url_and_target(&form_url, "_blank")?));
            if let Err(e) = opened {
                debug!("Registration form not opened: {}", e);
            }
        })?;
    }

    info!(
        "Registration buttons wired ({} scroll, {} open the form)",
        scrollers.len(),
        openers.len()
    );
    Ok(())
}
