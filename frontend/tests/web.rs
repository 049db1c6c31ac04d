//! Browser tests for the DOM wiring. Run with
//! `wasm-pack test --headless --chrome frontend`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, MouseEvent, MouseEventInit};

use hackathon_site::countdown::{Countdown, CountdownFrame, CountdownView};
use hackathon_site::cursor::{self, PointerKind};
use hackathon_site::trigger::ThresholdTrigger;
use hackathon_site::{counter, dom, faq, navigation, reveal};

wasm_bindgen_test_configure!(run_in_browser);

/// Mounts `html` in a fresh wrapper on the body. Call `.remove()` when done.
fn fixture(html: &str) -> Element {
    let document = dom::document().unwrap();
    let wrapper = document.create_element("div").unwrap();
    wrapper.set_inner_html(html);
    document.body().unwrap().append_child(&wrapper).unwrap();
    wrapper
}

fn by_id(id: &str) -> HtmlElement {
    dom::document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn cancelable_click() -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap()
}

#[wasm_bindgen_test]
fn faq_keeps_only_the_last_opened_item() {
    let root = fixture(
        r#"<div id="faq-list">
             <div class="faq-item" id="q1">
               <button class="faq-question" id="q1-btn">One</button>
             </div>
             <div class="faq-item" id="q2">
               <button class="faq-question" id="q2-btn">Two</button>
             </div>
           </div>"#,
    );
    faq::setup(&dom::document().unwrap()).unwrap();

    by_id("q1-btn").click();
    assert!(by_id("q1").class_list().contains("open"));

    by_id("q2-btn").click();
    assert!(!by_id("q1").class_list().contains("open"));
    assert!(by_id("q2").class_list().contains("open"));

    by_id("q2-btn").click();
    assert!(!by_id("q2").class_list().contains("open"));

    root.remove();
}

#[wasm_bindgen_test]
fn faq_leaves_preopened_items_until_clicked() {
    let root = fixture(
        r#"<div id="faq-list">
             <div class="faq-item open" id="p1">
               <button class="faq-question" id="p1-btn">One</button>
             </div>
             <div class="faq-item open" id="p2">
               <button class="faq-question" id="p2-btn">Two</button>
             </div>
             <div class="faq-item" id="p3">
               <button class="faq-question" id="p3-btn">Three</button>
             </div>
           </div>"#,
    );
    faq::setup(&dom::document().unwrap()).unwrap();
    assert!(by_id("p1").class_list().contains("open"));
    assert!(by_id("p2").class_list().contains("open"));

    // p2 was open, so clicking it closes everything.
    by_id("p2-btn").click();
    for id in ["p1", "p2", "p3"] {
        assert!(!by_id(id).class_list().contains("open"));
    }

    root.remove();
}

#[wasm_bindgen_test]
fn countdown_renders_started_and_remaining() {
    let root = fixture(
        r#"<div id="countdown">
             <span data-unit="days"></span><span data-unit="hours"></span>
             <span data-unit="minutes"></span><span data-unit="seconds"></span>
           </div>
           <div id="timebar-fill"></div>
           <div id="timebar-label"></div>"#,
    );
    let document = dom::document().unwrap();
    let view = CountdownView::find(&document, "Hackathon started").unwrap();
    let slot = |unit: &str| {
        document
            .query_selector(&format!("[data-unit=\"{}\"]", unit))
            .unwrap()
            .unwrap()
            .text_content()
            .unwrap()
    };

    let countdown = Countdown::new(200_000_000, 0);
    let frame = countdown.frame(100_000_000);
    assert!(matches!(frame, CountdownFrame::Remaining(_)));
    view.render(&frame).unwrap();
    assert_eq!(slot("days"), "01");
    assert_eq!(slot("hours"), "03");
    assert_eq!(slot("minutes"), "46");
    assert_eq!(slot("seconds"), "40");
    assert_eq!(by_id("timebar-label").text_content().unwrap(), "1d 3h 46m 40s");
    assert_eq!(by_id("timebar-fill").style().get_property_value("width").unwrap(), "50%");

    view.render(&countdown.frame(300_000_000)).unwrap();
    for unit in ["days", "hours", "minutes", "seconds"] {
        assert_eq!(slot(unit), "00");
    }
    assert_eq!(by_id("timebar-label").text_content().unwrap(), "Hackathon started");
    assert_eq!(by_id("timebar-fill").style().get_property_value("width").unwrap(), "0%");

    root.remove();
}

#[wasm_bindgen_test]
fn countdown_needs_every_slot() {
    let root = fixture(r#"<div id="countdown"><span data-unit="days"></span></div>"#);
    let err = CountdownView::find(&dom::document().unwrap(), "started").err().unwrap();
    assert!(err.is_absent());
    root.remove();
}

#[wasm_bindgen_test]
fn anchor_to_known_section_is_intercepted() {
    let root = fixture(
        r##"<a id="to-faq" href="#faq-target">FAQ</a>
           <section id="faq-target"></section>"##,
    );
    navigation::setup_anchors(&dom::document().unwrap()).unwrap();

    let link = by_id("to-faq");
    let not_cancelled = link.dispatch_event(&cancelable_click()).unwrap();
    assert!(!not_cancelled);

    root.remove();
}

#[wasm_bindgen_test]
async fn trigger_fires_once_per_element() {
    let root = fixture(
        r#"<div id="watched" style="position: fixed; top: 0; left: 0; width: 50px; height: 50px;">
           </div>"#,
    );
    let hits = Rc::new(Cell::new(0));
    let trigger = {
        let hits = hits.clone();
        ThresholdTrigger::watch(vec![by_id("watched").into()], 0.12, move |_| {
            hits.set(hits.get() + 1)
        })
        .unwrap()
    };

    TimeoutFuture::new(200).await;
    assert_eq!(hits.get(), 1);

    let watched = by_id("watched");
    watched.style().set_property("display", "none").unwrap();
    TimeoutFuture::new(100).await;
    watched.style().set_property("display", "block").unwrap();
    TimeoutFuture::new(200).await;
    assert_eq!(hits.get(), 1);

    drop(trigger);
    root.remove();
}

#[wasm_bindgen_test]
async fn counters_ramp_to_their_target() {
    let root = fixture(
        r#"<section id="about"
                    style="position: fixed; top: 0; left: 0; width: 200px; height: 200px;">
             <span id="members" data-count="800">0</span>
             <span id="prize" data-count="50000">0</span>
           </section>"#,
    );
    counter::setup(&dom::document().unwrap(), "₹").unwrap();

    let mut waited = 0;
    while by_id("prize").text_content().as_deref() != Some("₹50,000") && waited < 5000 {
        TimeoutFuture::new(100).await;
        waited += 100;
    }

    assert_eq!(by_id("members").text_content().unwrap(), "800+");
    assert_eq!(by_id("prize").text_content().unwrap(), "₹50,000");

    root.remove();
}

#[wasm_bindgen_test]
async fn reveal_marks_elements_in_view() {
    let root = fixture(
        r#"<div id="revealed" class="reveal"
                style="position: fixed; top: 0; left: 0; width: 50px; height: 50px;">
           </div>"#,
    );
    reveal::setup(&dom::document().unwrap()).unwrap();

    TimeoutFuture::new(200).await;
    assert!(by_id("revealed").class_list().contains("show"));

    root.remove();
}

#[wasm_bindgen_test]
fn register_buttons_tolerate_missing_section() {
    let root = fixture(
        r#"<button id="register-scroll">Register</button>
           <button id="apply-team">Apply as a team</button>"#,
    );
    let document = dom::document().unwrap();
    assert!(document.get_element_by_id("register").is_none());
    navigation::setup_register_buttons(&document, "https://example.com/form").unwrap();

    by_id("register-scroll").click();
    by_id("apply-team").click();

    root.remove();
}

#[wasm_bindgen_test]
fn register_buttons_scroll_to_existing_section() {
    let root = fixture(
        r#"<button id="register-scroll">Register</button>
           <section id="register" style="margin-top: 3000px; height: 100px;"></section>"#,
    );
    navigation::setup_register_buttons(&dom::document().unwrap(), "https://example.com/form")
        .unwrap();

    by_id("register-scroll").click();

    root.remove();
}

#[wasm_bindgen_test]
fn coarse_pointer_keeps_native_cursor() {
    let root = fixture(
        r#"<div class="cursor-dot" id="dot"></div>
           <div class="cursor-ring" id="ring"></div>"#,
    );
    let document = dom::document().unwrap();
    cursor::setup_with_kind(&document, PointerKind::Coarse).unwrap();

    let dot = by_id("dot");
    let ring = by_id("ring");
    let body = document.body().unwrap();
    assert_eq!(dot.style().get_property_value("display").unwrap(), "none");
    assert_eq!(ring.style().get_property_value("display").unwrap(), "none");
    assert_eq!(body.style().get_property_value("cursor").unwrap(), "auto");

    let init = MouseEventInit::new();
    init.set_client_x(40);
    init.set_client_y(60);
    let moved = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    dom::window().unwrap().dispatch_event(&moved).unwrap();

    assert_eq!(dot.style().get_property_value("left").unwrap(), "");
    assert_eq!(dot.style().get_property_value("top").unwrap(), "");

    body.style().remove_property("cursor").unwrap();
    root.remove();
}
