//! Countdown to the event start and the depleting time bar under it.
//!
//! Nothing is carried from one tick to the next except the time left at
//! page load, so every frame is computed from the wall clock alone.

use chrono::{DateTime, TimeZone, Utc};
use gloo_timers::callback::Interval;
use log::{debug, info};
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::error::PageError;

pub const CONTAINER_ID: &str = "countdown";
pub const FILL_ID: &str = "timebar-fill";
pub const LABEL_ID: &str = "timebar-label";
pub const TICK_MILLIS: u32 = 1000;

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Width of the time bar, always within `0..=100`.
    pub fill_percent: f64,
}

impl Remaining {
    /// Digit slots in days/hours/minutes/seconds order.
    pub fn slots(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }

    pub fn label(&self) -> String {
        format!("{}d {}h {}m {}s", self.days, self.hours, self.minutes, self.seconds)
    }

    pub fn as_millis(&self) -> i64 {
        self.days * DAY + self.hours * HOUR + self.minutes * MINUTE + self.seconds * SECOND
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownFrame {
    Remaining(Remaining),
    Started,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target_ms: i64,
    initial_diff_ms: i64,
}

impl Countdown {
    /// `now_ms` is the moment the page loaded. A target already in the past
    /// still gets a one millisecond baseline so the ratio stays defined.
    pub fn new(target_ms: i64, now_ms: i64) -> Self {
        Self {
            target_ms,
            initial_diff_ms: (target_ms - now_ms).max(1),
        }
    }

    pub fn starting_at<Tz: TimeZone>(target: &DateTime<Tz>, now: DateTime<Utc>) -> Self {
        Self::new(target.timestamp_millis(), now.timestamp_millis())
    }

    pub fn frame(&self, now_ms: i64) -> CountdownFrame {
        let diff = self.target_ms - now_ms;
        if diff <= 0 {
            return CountdownFrame::Started;
        }

        let ratio = diff as f64 / self.initial_diff_ms as f64;
        CountdownFrame::Remaining(Remaining {
            days: diff / DAY,
            hours: (diff / HOUR) % 24,
            minutes: (diff / MINUTE) % 60,
            seconds: (diff / SECOND) % 60,
            fill_percent: (ratio * 100.0).clamp(0.0, 100.0),
        })
    }
}

/// Zero pads to two digits; longer numbers are left alone.
pub fn pad2(value: i64) -> String {
    format!("{:02}", value)
}

/// The DOM nodes a countdown writes to.
pub struct CountdownView {
    slots: [Element; 4],
    fill: Option<HtmlElement>,
    label: Option<Element>,
    started_label: String,
}

impl CountdownView {
    pub fn find(document: &Document, started_label: &str) -> Result<Self, PageError> {
        let container = dom::by_id(document, CONTAINER_ID)?;
        let slot = |unit: &str| dom::query(&container, &format!("[data-unit=\"{}\"]", unit));

        let fill = match document.get_element_by_id(FILL_ID) {
            Some(el) => Some(dom::html_element(el, FILL_ID)?),
            None => None,
        };

        Ok(Self {
            slots: [slot("days")?, slot("hours")?, slot("minutes")?, slot("seconds")?],
            fill,
            label: document.get_element_by_id(LABEL_ID),
            started_label: started_label.to_string(),
        })
    }

    pub fn render(&self, frame: &CountdownFrame) -> Result<(), PageError> {
        let (texts, width, label) = match frame {
            CountdownFrame::Started => (
                [pad2(0), pad2(0), pad2(0), pad2(0)],
                0.0,
                self.started_label.clone(),
            ),
            CountdownFrame::Remaining(remaining) => {
                (remaining.slots(), remaining.fill_percent, remaining.label())
            }
        };

        for (slot, text) in self.slots.iter().zip(texts.iter()) {
            slot.set_text_content(Some(text));
        }
        if let Some(label_el) = &self.label {
            label_el.set_text_content(Some(&label));
        }
        if let Some(fill) = &self.fill {
            fill.style().set_property("width", &format!("{}%", width))?;
        }
        Ok(())
    }
}

pub fn setup(
    document: &Document,
    target: &DateTime<chrono::FixedOffset>,
    started_label: &str,
) -> Result<(), PageError> {
    let view = CountdownView::find(document, started_label)?;
    let countdown = Countdown::starting_at(target, Utc::now());

    let tick = move || {
        let frame = countdown.frame(Utc::now().timestamp_millis());
        if let Err(e) = view.render(&frame) {
            debug!("Countdown render failed: {}", e);
        }
    };

    tick();
    // Runs for as long as the page is open.
    Interval::new(TICK_MILLIS, tick).forget();

    info!("Countdown running towards {}", target.to_rfc3339());
    Ok(())
}
