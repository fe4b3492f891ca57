//! Sinks: `Output`, `ClusterOutput` and their plugin configurations.
//!
//! An [`OutputSpec`] is the decoded form of a sink resource, where every plugin
//! kind is an optional member. [`OutputSpec::sink`] validates that exactly one
//! member is populated and yields the [`SinkConfig`] sum type the compiler works
//! with.

pub mod buffer;
pub mod format;
pub mod http;
pub mod kafka;
pub mod null;
pub mod s3;
pub mod sumologic;

pub use buffer::Buffer;
pub use format::Format;
pub use http::{HttpAuth, HttpOutput};
pub use kafka::KafkaOutput;
pub use null::NullOutput;
pub use s3::S3Output;
pub use sumologic::SumologicOutput;

use crate::error::{Error, Result};
use crate::meta::{ObjectKey, ObjectKind, ObjectMeta};
use serde::{Deserialize, Serialize};

/// Namespace-scoped sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Sink spec.
    #[serde(default)]
    pub spec: OutputSpec,
}

/// Cluster-scoped sink, living in the control namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterOutput {
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Sink spec.
    #[serde(default)]
    pub spec: OutputSpec,
}

/// Decoded sink spec. Exactly one plugin member must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    /// Logging system this output attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_ref: Option<String>,
    /// Discard sink.
    #[serde(default, rename = "null", skip_serializing_if = "Option::is_none")]
    pub null: Option<NullOutput>,
    /// Sumo Logic HTTP source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sumologic: Option<SumologicOutput>,
    /// Generic HTTP endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpOutput>,
    /// Object storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Output>,
    /// Message queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka: Option<KafkaOutput>,
}

/// A validated sink plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkConfig {
    /// Discard sink.
    Null(NullOutput),
    /// Sumo Logic HTTP source.
    Sumologic(SumologicOutput),
    /// Generic HTTP endpoint.
    Http(HttpOutput),
    /// Object storage.
    S3(S3Output),
    /// Message queue.
    Kafka(KafkaOutput),
}

impl OutputSpec {
    /// Returns the single configured plugin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPlugin`] when no member is set and
    /// [`Error::MultiplePlugins`] when more than one is.
    pub fn sink(&self) -> Result<SinkConfig> {
        let mut configured: Vec<SinkConfig> = Vec::new();
        if let Some(null) = &self.null {
            configured.push(SinkConfig::Null(null.clone()));
        }
        if let Some(sumologic) = &self.sumologic {
            configured.push(SinkConfig::Sumologic(sumologic.clone()));
        }
        if let Some(http) = &self.http {
            configured.push(SinkConfig::Http(http.clone()));
        }
        if let Some(s3) = &self.s3 {
            configured.push(SinkConfig::S3(s3.clone()));
        }
        if let Some(kafka) = &self.kafka {
            configured.push(SinkConfig::Kafka(kafka.clone()));
        }

        match configured.len() {
            0 => Err(Error::NoPlugin),
            1 => Ok(configured.remove(0)),
            _ => Err(Error::MultiplePlugins(
                configured.iter().map(SinkConfig::plugin_type).collect(),
            )),
        }
    }
}

impl From<SinkConfig> for OutputSpec {
    fn from(sink: SinkConfig) -> Self {
        let mut spec = Self::default();
        match sink {
            SinkConfig::Null(c) => spec.null = Some(c),
            SinkConfig::Sumologic(c) => spec.sumologic = Some(c),
            SinkConfig::Http(c) => spec.http = Some(c),
            SinkConfig::S3(c) => spec.s3 = Some(c),
            SinkConfig::Kafka(c) => spec.kafka = Some(c),
        }
        spec
    }
}

impl SinkConfig {
    /// Plugin type name understood by the daemon.
    #[must_use]
    pub const fn plugin_type(&self) -> &'static str {
        match self {
            Self::Null(_) => "null",
            Self::Sumologic(_) => "sumologic",
            Self::Http(_) => "http",
            Self::S3(_) => "s3",
            Self::Kafka(_) => "kafka2",
        }
    }

    /// Checks that every required parameter is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first empty required field,
    /// including those of nested `auth` and `format` blocks.
    pub fn validate(&self) -> Result<()> {
        let missing_format = |format: Option<&Format>| format.and_then(Format::missing_field);
        let missing = match self {
            Self::Null(_) => None,
            Self::Sumologic(c) => c.source_name.is_empty().then_some("source_name"),
            Self::Http(c) => c
                .endpoint
                .is_empty()
                .then_some("endpoint")
                .or_else(|| c.auth.as_ref().and_then(HttpAuth::missing_field))
                .or_else(|| missing_format(c.format.as_ref())),
            Self::S3(c) => c
                .s3_bucket
                .is_empty()
                .then_some("s3_bucket")
                .or_else(|| missing_format(c.format.as_ref())),
            Self::Kafka(c) => c
                .brokers
                .is_empty()
                .then_some("brokers")
                .or_else(|| missing_format(c.format.as_ref())),
        };

        missing.map_or(Ok(()), |field| {
            Err(Error::MissingField {
                plugin: self.plugin_type(),
                field,
            })
        })
    }
}

impl Output {
    /// Creates an output with the given plugin.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, sink: SinkConfig) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            spec: sink.into(),
        }
    }

    /// Returns the output's identity.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.metadata.key()
    }

    /// Kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        ObjectKind::Output
    }
}

impl ClusterOutput {
    /// Creates a cluster output with the given plugin.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, sink: SinkConfig) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            spec: sink.into(),
        }
    }

    /// Returns the cluster output's identity.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.metadata.key()
    }

    /// Kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        ObjectKind::ClusterOutput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_has_no_plugin() {
        let spec = OutputSpec::default();
        assert!(matches!(spec.sink(), Err(Error::NoPlugin)));
    }

    #[test]
    fn two_members_are_rejected() {
        let spec = OutputSpec {
            null: Some(NullOutput::default()),
            sumologic: Some(SumologicOutput::default()),
            ..OutputSpec::default()
        };

        let err = spec.sink().unwrap_err();
        assert_eq!(
            err.to_string(),
            "multiple output plugins configured: null, sumologic"
        );
    }

    #[test]
    fn single_member_round_trips_through_sink() {
        let spec: OutputSpec = SinkConfig::Null(NullOutput::default()).into();
        assert_eq!(spec.sink().unwrap().plugin_type(), "null");
    }

    #[test]
    fn null_output_decodes_from_empty_map() {
        let spec: OutputSpec = serde_yaml::from_str("\"null\": {}").unwrap();
        assert!(spec.null.is_some());
    }

    #[test]
    fn validate_reports_missing_required_field() {
        let sink = SinkConfig::S3(S3Output::default());
        let err = sink.validate().unwrap_err();
        assert_eq!(err.to_string(), "missing required field 's3_bucket' for s3 output");
    }

    #[test]
    fn validate_checks_nested_auth_and_format() {
        let sink = SinkConfig::Http(HttpOutput {
            endpoint: "https://logs.example.com".to_string(),
            auth: Some(HttpAuth {
                username: "u".to_string(),
                password: String::new(),
            }),
            ..HttpOutput::default()
        });
        let err = sink.validate().unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'auth.password' for http output");

        let sink = SinkConfig::Kafka(KafkaOutput {
            brokers: vec!["kafka:9092".to_string()],
            format: Some(Format {
                format_type: String::new(),
                ..Format::default()
            }),
            ..KafkaOutput::default()
        });
        assert!(matches!(
            sink.validate(),
            Err(Error::MissingField { plugin: "kafka2", field: "format.type" })
        ));
    }
}
