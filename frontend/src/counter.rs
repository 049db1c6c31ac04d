//! Animated statistic counters.
//!
//! All counters start together the first time the stats section scrolls
//! into view, then ramp up one step per animation frame.

use std::ops::ControlFlow;

use log::{debug, info};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::PageError;
use crate::frame;
use crate::trigger::{OnceGate, ThresholdTrigger};

pub const SELECTOR: &str = "[data-count]";
pub const TARGET_ATTRIBUTE: &str = "data-count";
pub const SECTION_ID: &str = "about";
pub const THRESHOLD: f64 = 0.3;

/// Roughly how many frames a ramp takes, whatever the target.
const RAMP_STEPS: u64 = 80;
/// Targets above this are amounts of money.
const MONEY_ABOVE: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    target: u64,
    current: u64,
    phase: CounterPhase,
}

impl StatCounter {
    pub fn new(target: u64) -> Self {
        Self { target, current: 0, phase: CounterPhase::Idle }
    }

    /// Parses a `data-count` value. Leading/trailing whitespace is tolerated.
    /// Signs and trailing junk (`-5`, `12k`) are rejected rather than read
    /// leniently, so a mistyped attribute skips the counter.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Self::new)
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn increment(&self) -> u64 {
        (self.target / RAMP_STEPS).max(1)
    }

    pub fn is_money(&self) -> bool {
        self.target > MONEY_ABOVE
    }

    /// Advances one frame and returns the new value. Once the target is
    /// reached the counter is done and further calls change nothing.
    pub fn advance(&mut self) -> u64 {
        match self.phase {
            CounterPhase::Done => return self.current,
            CounterPhase::Idle => self.phase = CounterPhase::Running,
            CounterPhase::Running => {}
        }

        self.current = self.current.saturating_add(self.increment()).min(self.target);
        if self.current == self.target {
            self.phase = CounterPhase::Done;
        }
        self.current
    }

    pub fn display(&self, currency_symbol: &str) -> String {
        let grouped = format_grouped(self.current);
        if self.is_money() {
            format!("{}{}", currency_symbol, grouped)
        } else {
            format!("{}+", grouped)
        }
    }
}

/// Indian digit grouping: the last three digits, then pairs
/// (`12,34,567`).
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn animate(
    element: Element,
    mut counter: StatCounter,
    currency_symbol: String,
) -> Result<(), PageError> {
    frame::run(move || {
        counter.advance();
        element.set_text_content(Some(&counter.display(&currency_symbol)));
        match counter.phase() {
            CounterPhase::Done => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })
}

fn start_all(gate: &OnceGate, counters: &[(Element, StatCounter)], currency_symbol: &str) {
    if !gate.open() {
        return;
    }

    info!("Starting {} stat counter(s)", counters.len());
    for (element, counter) in counters {
        if let Err(e) = animate(element.clone(), counter.clone(), currency_symbol.to_string()) {
            debug!("Counter for target {} not started: {}", counter.target(), e);
        }
    }
}

pub fn setup(document: &Document, currency_symbol: &str) -> Result<(), PageError> {
    let section = dom::by_id(document, SECTION_ID)?;

    let counters: Vec<(Element, StatCounter)> = dom::query_all(document, SELECTOR)?
        .into_iter()
        .filter_map(|element| {
            let raw = element.get_attribute(TARGET_ATTRIBUTE)?;
            match StatCounter::parse(&raw) {
                Some(counter) => Some((element, counter)),
                None => {
                    debug!("Skipping counter with {}=\"{}\"", TARGET_ATTRIBUTE, raw);
                    None
                }
            }
        })
        .collect();

    let gate = OnceGate::new();
    let currency_symbol = currency_symbol.to_string();
    ThresholdTrigger::watch(vec![section], THRESHOLD, move |_| {
        start_all(&gate, &counters, &currency_symbol);
    })?
    .forget();

    info!("Stat counters waiting for #{}", SECTION_ID);
    Ok(())
}
