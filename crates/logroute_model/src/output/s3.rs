//! Object storage sink.

use super::{Buffer, Format};
use serde::{Deserialize, Serialize};

/// S3 sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Output {
    /// Access key id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_key_id: Option<String>,
    /// Secret access key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_sec_key: Option<String>,
    /// Bucket name.
    pub s3_bucket: String,
    /// Bucket region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_region: Option<String>,
    /// Custom endpoint for S3 compatible storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_endpoint: Option<String>,
    /// Object key prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Object key format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_object_key_format: Option<String>,
    /// Compression: `gzip`, `lzo`, `json` or `txt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_as: Option<String>,
    /// Check bucket and object existence before writing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_object: Option<bool>,
    /// Use path style addressing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_path_style: Option<bool>,
    /// Record formatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Buffering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Buffer>,
}
