//! Sumo Logic HTTP source sink.

use serde::{Deserialize, Serialize};

/// Sumo Logic sink configuration.
///
/// Field declaration order is the rendered parameter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumologicOutput {
    /// `logs` or `metrics`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Format of log records: `text`, `json`, `json_merge` or `fields`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,
    /// Format of metric records: `graphite`, `carbon2` or `prometheus`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_data_format: Option<String>,
    /// Source category attached to every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_category: Option<String>,
    /// Source name attached to every record.
    pub source_name: String,
    /// HTTP collector endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Record key holding the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_key: Option<String>,
    /// Prefix prepended to the source category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_category_prefix: Option<String>,
    /// Source host attached to every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_host: Option<String>,
    /// Connection open timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_timeout: Option<u32>,
    /// Add a timestamp field to records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_timestamp: Option<bool>,
    /// Proxy URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_uri: Option<String>,
}
