//! Message queue sink.

use super::{Buffer, Format};
use serde::{Deserialize, Serialize};

/// Kafka sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaOutput {
    /// Seed brokers, `host:port`.
    pub brokers: Vec<String>,
    /// Topic used when the record carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_topic: Option<String>,
    /// Record key holding the topic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_key: Option<String>,
    /// Record key holding the partition key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
    /// Fall back to the default topic when a topic is unknown. Always rendered.
    pub use_default_for_unknown_topic: bool,
    /// Acks required from brokers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_acks: Option<i64>,
    /// `gzip`, `snappy`, `lz4` or `zstd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_codec: Option<String>,
    /// Verify broker hostnames against their certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_verify_hostname: Option<bool>,
    /// Record formatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Buffering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Buffer>,
}
