//! One-shot visibility triggers.
//!
//! Every watched element carries its own [`TriggerState`]. The state, not
//! the observer subscription, is what guarantees the effect runs once:
//! unobserving after the first hit just saves the browser some work.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::PageError;

// Browsers report ratios that land a hair under the threshold that
// produced the notification.
const RATIO_SLACK: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Pending,
    Fired,
}

impl TriggerState {
    /// Feeds one intersection report. Returns true exactly once, on the
    /// first report where at least `threshold` of the element is visible.
    ///
    /// Merely touching the viewport is not enough. An element taller than
    /// `1 / threshold` viewports can never reach the threshold and so never
    /// fires.
    pub fn observe(&mut self, intersecting: bool, ratio: f64, threshold: f64) -> bool {
        if *self == TriggerState::Pending && intersecting && ratio + RATIO_SLACK >= threshold {
            *self = TriggerState::Fired;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        *self == TriggerState::Fired
    }
}

/// A process-wide "only once" flag that several callbacks can share.
#[derive(Debug, Clone, Default)]
pub struct OnceGate(Rc<Cell<bool>>);

impl OnceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate. Only the first caller gets `true`.
    pub fn open(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn is_open(&self) -> bool {
        self.0.get()
    }
}

struct Watched {
    element: Element,
    state: TriggerState,
}

/// Owns the observer and its JS callback. Dropping it stops watching.
pub struct ThresholdTrigger {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl ThresholdTrigger {
    /// Calls `on_enter` once per element, the first time at least
    /// `threshold` of it is visible.
    pub fn watch<F>(
        elements: Vec<Element>,
        threshold: f64,
        mut on_enter: F,
    ) -> Result<Self, PageError>
    where
        F: FnMut(&Element) + 'static,
    {
        let mut watched: Vec<Watched> = elements
            .iter()
            .cloned()
            .map(|element| Watched { element, state: TriggerState::Pending })
            .collect();

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();

                    let fired = watched
                        .iter_mut()
                        .find(|w| w.element == target)
                        .map(|w| {
                            let ratio = entry.intersection_ratio();
                            w.state.observe(entry.is_intersecting(), ratio, threshold)
                        })
                        .unwrap_or(false);

                    if fired {
                        observer.unobserve(&target);
                        on_enter(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for element in &elements {
            observer.observe(element);
        }
        debug!("Watching {} element(s) at threshold {}", elements.len(), threshold);

        Ok(Self { observer, _callback: callback })
    }

    /// Leaves the trigger running until the page unloads.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for ThresholdTrigger {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
