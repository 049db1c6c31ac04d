//! `requestAnimationFrame` driven ticking.
//!
//! A tick function is called once per frame and decides itself whether
//! another frame is needed. Returning [`ControlFlow::Break`] ends the chain
//! and releases the JS closure.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::dom;
use crate::error::PageError;

type FrameClosure = Closure<dyn FnMut()>;

fn request_frame(closure: &FrameClosure) -> Result<(), PageError> {
    dom::window()?.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}

/// Schedules `tick` on the next animation frame and keeps rescheduling it
/// until it breaks.
pub fn run<F>(mut tick: F) -> Result<(), PageError>
where
    F: FnMut() -> ControlFlow<()> + 'static,
{
    let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let handle = slot.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        let keep_going = tick().is_continue();
        if keep_going {
            if let Some(closure) = handle.borrow().as_ref() {
                if let Err(e) = request_frame(closure) {
                    log::warn!("Animation frame chain stopped: {}", e);
                } else {
                    return;
                }
            }
        }
        // Can't drop a closure from inside its own call, so hand it to the
        // next microtask.
        if let Some(finished) = handle.borrow_mut().take() {
            spawn_local(async move { drop(finished) });
        }
    }));

    let scheduled = match slot.borrow().as_ref() {
        Some(closure) => request_frame(closure),
        None => Ok(()),
    };
    scheduled
}
