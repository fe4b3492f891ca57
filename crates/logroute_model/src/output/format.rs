//! Formatter sub-configuration.

use serde::{Deserialize, Serialize};

/// Record formatter of a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    /// Formatter plugin: `json`, `ltsv`, `single_value`, ...
    #[serde(rename = "type")]
    pub format_type: String,
    /// Append a newline after each record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_newline: Option<bool>,
    /// Key used by `single_value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            format_type: "json".to_string(),
            add_newline: None,
            message_key: None,
        }
    }
}

impl Format {
    /// First empty required parameter, if any.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        self.format_type.is_empty().then_some("format.type")
    }
}
