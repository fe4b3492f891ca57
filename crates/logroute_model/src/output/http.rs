//! Generic HTTP endpoint sink.

use super::{Buffer, Format};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOutput {
    /// Target URL.
    pub endpoint: String,
    /// `post` or `put`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    /// Proxy URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Content-Type header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Send records as a JSON array. Always rendered.
    pub json_array: bool,
    /// Verify the server certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_verify_mode: Option<String>,
    /// Status codes that trigger a retry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub retryable_response_codes: Vec<u16>,
    /// Extra request headers, in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    /// Basic authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<HttpAuth>,
    /// Record formatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Buffering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Buffer>,
}

/// Basic authentication credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAuth {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl HttpAuth {
    /// First empty credential, if any.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        if self.username.is_empty() {
            Some("auth.username")
        } else if self.password.is_empty() {
            Some("auth.password")
        } else {
            None
        }
    }
}
