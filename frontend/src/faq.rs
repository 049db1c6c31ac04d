use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::dom;
use crate::error::PageError;

pub const ITEM_SELECTOR: &str = "#faq-list .faq-item";
pub const QUESTION_SELECTOR: &str = ".faq-question";
pub const OPEN_CLASS: &str = "open";

/// At most one item open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(open: Option<usize>) -> Self {
        Self { open }
    }

    /// Clicking the open item closes it, clicking any other opens it
    /// instead.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.open = if self.open == Some(index) { None } else { Some(index) };
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }
}

fn render(items: &[Element], accordion: &Accordion) -> Result<(), PageError> {
    for (index, item) in items.iter().enumerate() {
        let classes = item.class_list();
        if accordion.is_open(index) {
            classes.add_1(OPEN_CLASS)?;
        } else {
            classes.remove_1(OPEN_CLASS)?;
        }
    }
    Ok(())
}

pub fn setup(document: &Document) -> Result<(), PageError> {
    let items = Rc::new(dom::query_all(document, ITEM_SELECTOR)?);
    if items.is_empty() {
        return Err(PageError::MissingElement(ITEM_SELECTOR.to_string()));
    }

    for (index, item) in items.iter().enumerate() {
        let question = match dom::query(item, QUESTION_SELECTOR) {
            Ok(question) => question,
            Err(e) if e.is_absent() => {
                debug!("FAQ item {} has no question, skipping", index);
                continue;
            }
            Err(e) => return Err(e),
        };

        let items = items.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
            // The markup is the source of truth, whatever it shipped with.
            let was_open = items[index].class_list().contains(OPEN_CLASS);
            let mut accordion = Accordion::with_open(was_open.then_some(index));
            accordion.toggle(index);
            if let Err(e) = render(&items, &accordion) {
                debug!("FAQ render failed: {}", e);
            }
        });
        question.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    info!("FAQ accordion wired for {} item(s)", items.len());
    Ok(())
}
