//! Client-side behavior for the hackathon landing page.
//!
//! The markup is static; this crate only attaches behavior to it. Every
//! piece is wired independently so a page missing, say, the FAQ still gets
//! its countdown.

use log::{debug, info, warn};

pub mod config;
pub mod countdown;
pub mod counter;
pub mod cursor;
pub mod dom;
pub mod error;
pub mod faq;
pub mod frame;
pub mod navigation;
pub mod reveal;
pub mod trigger;

use config::PageConfig;
use error::PageError;

fn wire(name: &str, result: Result<(), PageError>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_absent() => debug!("Skipping {}: {}", name, e),
        Err(e) => warn!("Could not set up {}: {}", name, e),
    }
}

/// Attaches every page behavior. Only fails when there is no document at
/// all.
pub fn start() -> Result<(), PageError> {
    let document = dom::document()?;
    let config = PageConfig::load(&document);

    wire("anchor scrolling", navigation::setup_anchors(&document));
    wire(
        "registration buttons",
        navigation::setup_register_buttons(&document, &config.registration_form_url),
    );
    wire("scroll reveal", reveal::setup(&document));
    wire("stat counters", counter::setup(&document, &config.currency_symbol));
    wire("FAQ", faq::setup(&document));
    wire(
        "countdown",
        config
            .event_start()
            .and_then(|start| countdown::setup(&document, &start, &config.started_label)),
    );
    wire("custom cursor", cursor::setup(&document));

    info!("Page behaviors attached");
    Ok(())
}
