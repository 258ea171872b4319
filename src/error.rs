//! Error type shared by the tracker core and the DOM binding.

use wasm_bindgen::JsValue;

/// Failures surfaced by setup and click handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// A click arrived for an item that was never registered.
    #[error("item {key} was clicked but never registered")]
    Unregistered { key: String },

    /// The rendered opacity could not be read or parsed.
    #[error("unreadable opacity '{raw}'")]
    Opacity { raw: String },

    /// A browser API call failed.
    #[error("dom: {0}")]
    Dom(String),

    /// The tracker configuration is malformed.
    #[error("config: {0}")]
    Config(String),
}

impl TrackerError {
    pub fn unregistered(key: impl std::fmt::Debug) -> Self {
        Self::Unregistered {
            key: format!("{key:?}"),
        }
    }

    /// Wraps a thrown JS value, keeping its string form when it has one.
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<TrackerError> for JsValue {
    fn from(err: TrackerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
