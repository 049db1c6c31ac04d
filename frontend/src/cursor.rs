//! Custom cursor: a dot glued to the pointer and a ring that eases after it.
//! Touch-first devices keep the native cursor.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Reflect;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

use crate::dom;
use crate::error::PageError;
use crate::frame;

pub const DOT_SELECTOR: &str = ".cursor-dot";
pub const RING_SELECTOR: &str = ".cursor-ring";
pub const HOVER_TARGETS: &str = "a, button, .track-card, .primary-btn, .secondary-link";
pub const HOVER_CLASS: &str = "cursor-hover";
pub const PRESSED_CLASS: &str = "cursor-down";

/// Fraction of the remaining distance the ring covers each frame.
pub const RING_EASING: f64 = 0.16;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Fine,
    Coarse,
}

impl PointerKind {
    pub fn classify(coarse_media: bool, has_touch: bool) -> Self {
        if coarse_media || has_touch {
            PointerKind::Coarse
        } else {
            PointerKind::Fine
        }
    }
}

/// Pointer position plus the lagging ring position.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFollower {
    pointer: Point,
    ring: Point,
}

impl CursorFollower {
    pub fn new(start: Point) -> Self {
        Self { pointer: start, ring: start }
    }

    pub fn move_pointer(&mut self, to: Point) {
        self.pointer = to;
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn ring(&self) -> Point {
        self.ring
    }

    /// One frame of `ring += (pointer - ring) * easing`.
    pub fn tick(&mut self) -> Point {
        self.ring.x += (self.pointer.x - self.ring.x) * RING_EASING;
        self.ring.y += (self.pointer.y - self.ring.y) * RING_EASING;
        self.ring
    }
}

fn pointer_kind(window: &Window) -> PointerKind {
    let coarse_media = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false);
    let has_touch = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    PointerKind::classify(coarse_media, has_touch)
}

fn viewport_centre(window: &Window) -> Point {
    let half = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) / 2.0
    };
    Point::new(half(window.inner_width()), half(window.inner_height()))
}

fn place(element: &HtmlElement, at: Point) -> Result<(), PageError> {
    dom::set_px(element, "left", at.x)?;
    dom::set_px(element, "top", at.y)
}

fn hide_custom_cursor(
    document: &Document,
    dot: &HtmlElement,
    ring: &HtmlElement,
) -> Result<(), PageError> {
    dot.style().set_property("display", "none")?;
    ring.style().set_property("display", "none")?;
    if let Some(body) = document.body() {
        body.style().set_property("cursor", "auto")?;
    }
    Ok(())
}

fn toggle_class_on(
    target: &web_sys::EventTarget,
    event: &str,
    ring: &Element,
    add: bool,
    class: &'static str,
) -> Result<(), PageError> {
    let ring = ring.clone();
    let listener = Closure::<dyn FnMut()>::new(move || {
        let classes = ring.class_list();
        let result = if add { classes.add_1(class) } else { classes.remove_1(class) };
        if let Err(e) = result {
            debug!("Cursor class {} not updated: {:?}", class, e);
        }
    });
    target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

pub fn setup(document: &Document) -> Result<(), PageError> {
    let kind = pointer_kind(&dom::window()?);
    setup_with_kind(document, kind)
}

/// Wires the cursor for an already classified pointer. Coarse pointers only
/// get the custom elements hidden, no listeners are attached.
pub fn setup_with_kind(document: &Document, kind: PointerKind) -> Result<(), PageError> {
    let window = dom::window()?;
    let dot = dom::html_element(
        document
            .query_selector(DOT_SELECTOR)?
            .ok_or_else(|| PageError::MissingElement(DOT_SELECTOR.to_string()))?,
        DOT_SELECTOR,
    )?;
    let ring = dom::html_element(
        document
            .query_selector(RING_SELECTOR)?
            .ok_or_else(|| PageError::MissingElement(RING_SELECTOR.to_string()))?,
        RING_SELECTOR,
    )?;

    if kind == PointerKind::Coarse {
        info!("Touch device, keeping the native cursor");
        return hide_custom_cursor(document, &dot, &ring);
    }

    let follower = Rc::new(RefCell::new(CursorFollower::new(viewport_centre(&window))));

    {
        let follower = follower.clone();
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            let at = Point::new(e.client_x() as f64, e.client_y() as f64);
            follower.borrow_mut().move_pointer(at);
            if let Err(err) = place(&dot, at) {
                debug!("Cursor dot not placed: {}", err);
            }
        });
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let follower = follower.clone();
        let ring = ring.clone();
        frame::run(move || {
            let at = follower.borrow_mut().tick();
            if let Err(e) = place(&ring, at) {
                debug!("Cursor ring not placed: {}", e);
            }
            ControlFlow::Continue(())
        })?;
    }

    for target in dom::query_all(document, HOVER_TARGETS)? {
        toggle_class_on(&target, "mouseenter", &ring, true, HOVER_CLASS)?;
        toggle_class_on(&target, "mouseleave", &ring, false, HOVER_CLASS)?;
    }
    toggle_class_on(&window, "mousedown", &ring, true, PRESSED_CLASS)?;
    toggle_class_on(&window, "mouseup", &ring, false, PRESSED_CLASS)?;

    info!("Custom cursor enabled");
    Ok(())
}
