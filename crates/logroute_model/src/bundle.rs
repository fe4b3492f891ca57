//! Resource bundle decoding.
//!
//! A bundle is either a YAML stream of documents separated by `---` or a JSON
//! array. Every document carries a `kind` and the usual `metadata`/`spec`
//! pair:
//!
//! ```yaml
//! kind: Flow
//! metadata:
//!   name: nginx
//!   namespace: default
//! spec:
//!   selectors:
//!     app: nginx
//!   localOutputRefs: [archive]
//! ```
//!
//! `apiVersion` and unknown fields are ignored.

use crate::error::{Error, Result};
use crate::flow::{ClusterFlow, Flow};
use crate::logging::Logging;
use crate::output::{ClusterOutput, Output};
use serde::Deserialize;
use tracing::debug;

/// One decoded resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A `Logging` resource.
    Logging(Logging),
    /// A `Flow` resource.
    Flow(Flow),
    /// A `ClusterFlow` resource.
    ClusterFlow(ClusterFlow),
    /// An `Output` resource.
    Output(Output),
    /// A `ClusterOutput` resource.
    ClusterOutput(ClusterOutput),
}

/// All resources of a bundle, grouped by kind in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    /// `Logging` resources.
    pub loggings: Vec<Logging>,
    /// `Flow` resources.
    pub flows: Vec<Flow>,
    /// `ClusterFlow` resources.
    pub cluster_flows: Vec<ClusterFlow>,
    /// `Output` resources.
    pub outputs: Vec<Output>,
    /// `ClusterOutput` resources.
    pub cluster_outputs: Vec<ClusterOutput>,
}

impl Bundle {
    /// Decodes a YAML document stream.
    ///
    /// # Errors
    ///
    /// Returns an error if a document is not valid YAML, lacks a `kind`, or
    /// declares an unsupported kind.
    pub fn from_yaml(input: &str) -> Result<Self> {
        let mut bundle = Self::default();
        for document in serde_yaml::Deserializer::from_str(input) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            let kind = value
                .get("kind")
                .and_then(serde_yaml::Value::as_str)
                .unwrap_or_default()
                .to_string();
            bundle.push(decode_yaml(&kind, value)?);
        }
        debug!(resources = bundle.len(), "decoded yaml bundle");
        Ok(bundle)
    }

    /// Decodes a JSON array of resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON array of resources with a
    /// supported `kind`.
    pub fn from_json(input: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(input)?;
        let mut bundle = Self::default();
        for value in values {
            let kind = value
                .get("kind")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            bundle.push(decode_json(&kind, value)?);
        }
        debug!(resources = bundle.len(), "decoded json bundle");
        Ok(bundle)
    }

    /// Adds a resource to its kind's list.
    pub fn push(&mut self, resource: Resource) {
        match resource {
            Resource::Logging(r) => self.loggings.push(r),
            Resource::Flow(r) => self.flows.push(r),
            Resource::ClusterFlow(r) => self.cluster_flows.push(r),
            Resource::Output(r) => self.outputs.push(r),
            Resource::ClusterOutput(r) => self.cluster_outputs.push(r),
        }
    }

    /// Total number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggings.len()
            + self.flows.len()
            + self.cluster_flows.len()
            + self.outputs.len()
            + self.cluster_outputs.len()
    }

    /// Returns true if the bundle holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode_yaml(kind: &str, value: serde_yaml::Value) -> Result<Resource> {
    Ok(match kind {
        "Logging" => Resource::Logging(serde_yaml::from_value(value)?),
        "Flow" => Resource::Flow(serde_yaml::from_value(value)?),
        "ClusterFlow" => Resource::ClusterFlow(serde_yaml::from_value(value)?),
        "Output" => Resource::Output(serde_yaml::from_value(value)?),
        "ClusterOutput" => Resource::ClusterOutput(serde_yaml::from_value(value)?),
        other => return Err(Error::UnsupportedKind(other.to_string())),
    })
}

fn decode_json(kind: &str, value: serde_json::Value) -> Result<Resource> {
    Ok(match kind {
        "Logging" => Resource::Logging(serde_json::from_value(value)?),
        "Flow" => Resource::Flow(serde_json::from_value(value)?),
        "ClusterFlow" => Resource::ClusterFlow(serde_json::from_value(value)?),
        "Output" => Resource::Output(serde_json::from_value(value)?),
        "ClusterOutput" => Resource::ClusterOutput(serde_json::from_value(value)?),
        other => return Err(Error::UnsupportedKind(other.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"
apiVersion: logging.example.com/v1beta1
kind: Logging
metadata:
  name: test-logging
spec:
  controlNamespace: control
  watchNamespaces: [default]
  flowConfigCheckDisabled: true
---
kind: Output
metadata:
  name: test-output
  namespace: default
spec:
  sumologic:
    data_type: metrics
    metric_data_format: carbon2
    log_format: json
    source_category: prod/someapp/logs
    source_name: AppA
---
kind: Flow
metadata:
  name: test-flow
  namespace: default
spec:
  selectors:
    app: nginx
  localOutputRefs: [test-output]
"#;

    #[test]
    fn decode_yaml_stream() {
        let bundle = Bundle::from_yaml(BUNDLE).unwrap();
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.loggings[0].spec.control_namespace, "control");
        assert!(bundle.loggings[0].spec.flow_config_check_disabled);

        let sink = bundle.outputs[0].spec.sink().unwrap();
        assert_eq!(sink.plugin_type(), "sumologic");
        assert_eq!(bundle.flows[0].spec.selectors["app"], "nginx");
    }

    #[test]
    fn decode_json_array() {
        let input = r#"[
            {"kind": "ClusterOutput", "metadata": {"name": "drop", "namespace": "control"},
             "spec": {"null": {}}},
            {"kind": "ClusterFlow", "metadata": {"name": "all", "namespace": "control"},
             "spec": {"globalOutputRefs": ["drop"]}}
        ]"#;

        let bundle = Bundle::from_json(input).unwrap();
        assert_eq!(bundle.cluster_outputs.len(), 1);
        assert_eq!(bundle.cluster_flows[0].spec.output_refs, vec!["drop"]);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = Bundle::from_yaml("kind: Pod\nmetadata:\n  name: x\n");
        assert!(matches!(result, Err(Error::UnsupportedKind(kind)) if kind == "Pod"));
    }

    #[test]
    fn empty_documents_are_skipped() {
        let bundle = Bundle::from_yaml("---\n---\n").unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn http_headers_decode_from_a_mapping_in_order() {
        let input = r"
kind: Output
metadata:
  name: ingest
  namespace: default
spec:
  http:
    endpoint: https://logs.example.com
    headers:
      X-Tenant: a
      Accept: application/json
";
        let bundle = Bundle::from_yaml(input).unwrap();
        let Some(http) = &bundle.outputs[0].spec.http else {
            panic!("expected http output");
        };
        let keys: Vec<_> = http.headers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["X-Tenant", "Accept"]);
        assert_eq!(http.headers["X-Tenant"], "a");
    }

    #[test]
    fn json_http_headers_keep_declaration_order() {
        let input = r#"[
            {"kind": "Output", "metadata": {"name": "ingest", "namespace": "default"},
             "spec": {"http": {"endpoint": "https://logs.example.com",
                               "headers": {"X-Zeta": "1", "X-Alpha": "2"}}}}
        ]"#;

        let bundle = Bundle::from_json(input).unwrap();
        let Some(http) = &bundle.outputs[0].spec.http else {
            panic!("expected http output");
        };
        let keys: Vec<_> = http.headers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["X-Zeta", "X-Alpha"]);
    }
}
