//! Object identity shared by every resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name and namespace of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Resource name, unique within its namespace.
    pub name: String,
    /// Owning namespace. Empty for cluster-wide resources such as `Logging`.
    #[serde(default)]
    pub namespace: String,
}

impl ObjectMeta {
    /// Creates metadata for a namespaced resource.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Returns the `namespace/name` key of this object.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(&self.namespace, &self.name)
    }
}

/// `namespace/name` identity of an object.
///
/// Ordering is by namespace first, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Namespace component.
    pub namespace: String,
    /// Name component.
    pub name: String,
}

impl ObjectKey {
    /// Creates a key.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Resource kinds a compile pass deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Tenant boundary resource.
    Logging,
    /// Namespace-scoped routing rule.
    Flow,
    /// Cluster-scoped routing rule.
    ClusterFlow,
    /// Namespace-scoped sink.
    Output,
    /// Cluster-scoped sink.
    ClusterOutput,
}

impl ObjectKind {
    /// Lowercase name used in messages and identifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logging => "logging",
            Self::Flow => "flow",
            Self::ClusterFlow => "clusterflow",
            Self::Output => "output",
            Self::ClusterOutput => "clusteroutput",
        }
    }

    /// Returns true for cluster-scoped kinds.
    #[must_use]
    pub const fn is_cluster_scoped(self) -> bool {
        matches!(self, Self::ClusterFlow | Self::ClusterOutput)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
