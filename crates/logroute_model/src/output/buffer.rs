//! Buffer sub-configuration shared by sinks.

use serde::{Deserialize, Serialize};

/// Default buffer chunk keys.
pub const DEFAULT_CHUNK_KEYS: &str = "tag,time";

/// Default buffer plugin.
pub const DEFAULT_BUFFER_TYPE: &str = "file";

/// Buffering parameters of a sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buffer {
    /// Chunk keys. Defaults to [`DEFAULT_CHUNK_KEYS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Buffer plugin. Defaults to [`DEFAULT_BUFFER_TYPE`].
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub buffer_type: Option<String>,
    /// File buffer path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Maximum size of a chunk, e.g. `8MB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_limit_size: Option<String>,
    /// Maximum size of the whole buffer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_limit_size: Option<String>,
    /// `default`, `lazy`, `interval` or `immediate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_mode: Option<String>,
    /// Flush interval, e.g. `60s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_interval: Option<String>,
    /// Number of flush threads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_thread_count: Option<u32>,
    /// Time chunk granularity, e.g. `10m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timekey: Option<String>,
    /// Delay before flushing a time chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timekey_wait: Option<String>,
    /// Use UTC for time chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timekey_use_utc: Option<bool>,
    /// Retry forever on flush failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_forever: Option<bool>,
    /// Maximum number of retries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_max_times: Option<u32>,
    /// `throw_exception`, `block` or `drop_oldest_chunk`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_action: Option<String>,
}

impl Buffer {
    /// Chunk keys in effect.
    #[must_use]
    pub fn chunk_keys(&self) -> &str {
        self.tags.as_deref().unwrap_or(DEFAULT_CHUNK_KEYS)
    }

    /// Buffer plugin in effect.
    #[must_use]
    pub fn plugin_type(&self) -> &str {
        self.buffer_type.as_deref().unwrap_or(DEFAULT_BUFFER_TYPE)
    }
}
