use log::{debug, info};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::PageError;
use crate::trigger::ThresholdTrigger;

pub const SELECTOR: &str = ".reveal";
pub const THRESHOLD: f64 = 0.12;
pub const SHOWN_CLASS: &str = "show";

fn reveal(element: &Element) {
    if let Err(e) = element.class_list().add_1(SHOWN_CLASS) {
        debug!("Could not reveal element: {:?}", e);
    }
}

pub fn setup(document: &Document) -> Result<(), PageError> {
    let elements = dom::query_all(document, SELECTOR)?;
    if elements.is_empty() {
        return Err(PageError::MissingElement(SELECTOR.to_string()));
    }

    let count = elements.len();
    ThresholdTrigger::watch(elements, THRESHOLD, reveal)?.forget();
    info!("Scroll reveal armed for {} element(s)", count);
    Ok(())
}
