//! Lifecycle event model (JSON).
//!
//! Events arrive as `{"type": "...", "action": "...", "attributes": {...}}`.
//! Unknown fields are tolerated so producers may attach extra metadata;
//! unknown `type` strings map to [`EventType::Other`] and are dropped by the
//! extraction policy rather than rejected at decode time.

use std::collections::HashMap;

use serde::Deserialize;

/// Event category. Closed set: matching on it is exhaustive, so adding a
/// counted category is a compile-checked change everywhere it is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Container,
    Image,
    Network,
    Plugin,
    Volume,
    /// Any category this crate does not recognize.
    #[serde(other)]
    Other,
}

/// A lifecycle notification: a category, a verb, and free-form attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event category (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: EventType,
    /// Free-form verb, e.g. "start", "pull", "mount".
    pub action: String,
    /// Attribute keys vary by category and are not guaranteed present.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Event {
    /// Attribute lookup; absent keys read as the empty string.
    pub fn attr(&self, key: &str) -> &str {
        self.attributes.get(key).map(String::as_str).unwrap_or_default()
    }
}
