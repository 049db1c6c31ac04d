use chrono::{DateTime, FixedOffset};
use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::PageError;

/// Id of the optional `<script type="application/json">` block that can
/// override the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Local builds via `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Event kickoff, always with an explicit offset (IST for the default).
    pub event_start: String,
    pub registration_form_url: String,
    pub started_label: String,
    pub currency_symbol: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            event_start: "2026-01-30T09:00:00+05:30".to_string(),
            registration_form_url: "https://forms.gle/jmQy37MxzVzES8AG8".to_string(),
            started_label: "Hackathon started".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the config island if the page has one. A broken island is
    /// reported and ignored so the rest of the page still works.
    pub fn load(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn event_start(&self) -> Result<DateTime<FixedOffset>, PageError> {
        Ok(DateTime::parse_from_rfc3339(&self.event_start)?)
    }
}
