//! Routing rules: `Flow` and `ClusterFlow`.

use crate::meta::{ObjectKey, ObjectKind, ObjectMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Origin or selector labels. Keys are kept sorted.
pub type Labels = BTreeMap<String, String>;

/// Namespace-scoped routing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Flow spec.
    #[serde(default)]
    pub spec: FlowSpec,
}

/// Spec of a `Flow`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSpec {
    /// Logging system this flow attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_ref: Option<String>,
    /// Flat label selector shorthand.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selectors: Labels,
    /// Ordered match entries.
    #[serde(default, rename = "match", skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Match>,
    /// Names of `Output`s in the flow's namespace.
    #[serde(default, alias = "localOutputRefs", skip_serializing_if = "Vec::is_empty")]
    pub output_refs: Vec<String>,
    /// Names of `ClusterOutput`s in the control namespace.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_output_refs: Vec<String>,
}

/// One entry of a flow's match list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Include streams whose labels are a superset of these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    /// Drop streams whose labels are a superset of these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Exclude>,
}

/// Select clause of a flow match entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    /// Required labels.
    #[serde(default)]
    pub labels: Labels,
}

/// Exclude clause of a flow match entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclude {
    /// Labels that cause a drop.
    #[serde(default)]
    pub labels: Labels,
}

/// Cluster-scoped routing rule, living in the control namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterFlow {
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Cluster flow spec.
    #[serde(default)]
    pub spec: ClusterFlowSpec,
}

/// Spec of a `ClusterFlow`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterFlowSpec {
    /// Logging system this flow attaches to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_ref: Option<String>,
    /// Flat label selector shorthand.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selectors: Labels,
    /// Ordered match entries.
    #[serde(default, rename = "match", skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<ClusterMatch>,
    /// Names of `ClusterOutput`s in the control namespace.
    #[serde(default, alias = "globalOutputRefs", skip_serializing_if = "Vec::is_empty")]
    pub output_refs: Vec<String>,
}

/// One entry of a cluster flow's match list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMatch {
    /// Include clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<ClusterSelect>,
    /// Exclude clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<ClusterExclude>,
}

/// Select clause of a cluster match entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSelect {
    /// Required labels.
    #[serde(default)]
    pub labels: Labels,
    /// Namespaces the clause applies to. Empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
}

/// Exclude clause of a cluster match entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterExclude {
    /// Labels that cause a drop.
    #[serde(default)]
    pub labels: Labels,
    /// Namespaces the clause applies to. Empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
}

impl Flow {
    /// Creates an empty flow.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            spec: FlowSpec::default(),
        }
    }

    /// Returns the flow's identity.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.metadata.key()
    }

    /// Kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        ObjectKind::Flow
    }

    /// Adds a flat selector label.
    #[must_use]
    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.selectors.insert(key.into(), value.into());
        self
    }

    /// Appends a match entry.
    #[must_use]
    pub fn with_match(mut self, entry: Match) -> Self {
        self.spec.matches.push(entry);
        self
    }

    /// Appends a local output reference.
    #[must_use]
    pub fn with_output_ref(mut self, name: impl Into<String>) -> Self {
        self.spec.output_refs.push(name.into());
        self
    }

    /// Appends a global output reference.
    #[must_use]
    pub fn with_global_output_ref(mut self, name: impl Into<String>) -> Self {
        self.spec.global_output_refs.push(name.into());
        self
    }
}

impl ClusterFlow {
    /// Creates an empty cluster flow.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            spec: ClusterFlowSpec::default(),
        }
    }

    /// Returns the cluster flow's identity.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.metadata.key()
    }

    /// Kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        ObjectKind::ClusterFlow
    }

    /// Adds a flat selector label.
    #[must_use]
    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.selectors.insert(key.into(), value.into());
        self
    }

    /// Appends a match entry.
    #[must_use]
    pub fn with_match(mut self, entry: ClusterMatch) -> Self {
        self.spec.matches.push(entry);
        self
    }

    /// Appends a cluster output reference.
    #[must_use]
    pub fn with_output_ref(mut self, name: impl Into<String>) -> Self {
        self.spec.output_refs.push(name.into());
        self
    }
}

impl Match {
    /// Entry with only a select clause.
    #[must_use]
    pub fn select<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            select: Some(Select {
                labels: collect_labels(labels),
            }),
            exclude: None,
        }
    }

    /// Entry with only an exclude clause.
    #[must_use]
    pub fn exclude<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            select: None,
            exclude: Some(Exclude {
                labels: collect_labels(labels),
            }),
        }
    }
}

impl ClusterMatch {
    /// Entry with only a select clause.
    #[must_use]
    pub fn select<I, K, V>(labels: I, namespaces: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            select: Some(ClusterSelect {
                labels: collect_labels(labels),
                namespaces: namespaces.iter().map(ToString::to_string).collect(),
            }),
            exclude: None,
        }
    }

    /// Entry with only an exclude clause.
    #[must_use]
    pub fn exclude<I, K, V>(labels: I, namespaces: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            select: None,
            exclude: Some(ClusterExclude {
                labels: collect_labels(labels),
                namespaces: namespaces.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}

fn collect_labels<I, K, V>(labels: I) -> Labels
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    labels
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_flow_with_match_list() {
        let yaml = r"
metadata:
  name: test-flow
  namespace: default
spec:
  match:
    - select:
        labels:
          app: nginx
    - exclude:
        labels:
          env: dev
  localOutputRefs:
    - test-output
";
        let flow: Flow = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(flow.key().to_string(), "default/test-flow");
        assert_eq!(flow.spec.matches.len(), 2);
        assert!(flow.spec.matches[0].select.is_some());
        assert!(flow.spec.matches[1].exclude.is_some());
        assert_eq!(flow.spec.output_refs, vec!["test-output"]);
    }

    #[test]
    fn decode_cluster_match_namespaces() {
        let yaml = r"
metadata:
  name: all
  namespace: control
spec:
  match:
    - select:
        labels: {}
        namespaces: [a, b]
  globalOutputRefs: [archive]
";
        let flow: ClusterFlow = serde_yaml::from_str(yaml).unwrap();
        let select = flow.spec.matches[0].select.as_ref().unwrap();
        assert_eq!(select.namespaces, vec!["a", "b"]);
        assert_eq!(flow.spec.output_refs, vec!["archive"]);
    }

    #[test]
    fn builders_preserve_declaration_order() {
        let flow = Flow::new("ns", "f")
            .with_match(Match::select([("a", "b")]))
            .with_match(Match::exclude([("a", "b")]))
            .with_output_ref("x")
            .with_output_ref("x");

        assert!(flow.spec.matches[0].select.is_some());
        assert!(flow.spec.matches[1].exclude.is_some());
        assert_eq!(flow.spec.output_refs, vec!["x", "x"]);
    }
}
