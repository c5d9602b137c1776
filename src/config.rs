//! Mediator configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for one mediator session.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use typed_mediator::MediatorConfig;
///
/// let config = MediatorConfig::from_json(r#"{ "name": "game" }"#).unwrap();
/// assert_eq!(config.name, "game");
/// assert!(!config.warn_on_unhandled_events);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Label attached to every log line the registry emits.
    pub name: String,
    /// Log unhandled events at `warn` instead of `debug`.
    pub warn_on_unhandled_events: bool,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            name: "mediator".to_string(),
            warn_on_unhandled_events: false,
        }
    }
}

impl MediatorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn warn_on_unhandled_events(mut self, warn: bool) -> Self {
        self.warn_on_unhandled_events = warn;
        self
    }
}
