use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element `{0}` not found")]
    MissingElement(String),

    #[error("element `{0}` is not an HtmlElement")]
    NotHtmlElement(String),

    #[error("invalid event start: {0}")]
    EventStart(#[from] chrono::ParseError),

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl PageError {
    /// True when the page simply doesn't carry the markup a behavior needs.
    /// Those are skipped quietly, everything else gets a warning.
    pub fn is_absent(&self) -> bool {
        matches!(self, PageError::MissingElement(_))
    }
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        PageError::Js(message)
    }
}
