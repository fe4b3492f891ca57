//! The logging system a compile pass runs for.

use crate::meta::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Default port of the daemon's forward input.
pub const DEFAULT_FORWARD_PORT: u16 = 24240;

/// Default bind address of the daemon's forward input.
pub const DEFAULT_FORWARD_BIND: &str = "0.0.0.0";

/// A `Logging` resource as decoded from its persisted form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    /// Object metadata. Only the name is meaningful.
    pub metadata: ObjectMeta,
    /// Logging spec.
    #[serde(default)]
    pub spec: LoggingSpec,
}

/// Spec of a `Logging` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSpec {
    /// Reference that flows and outputs use to attach to this system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_ref: Option<String>,
    /// Namespace holding cluster-scoped flows and outputs.
    pub control_namespace: String,
    /// Namespaces whose flows and outputs are considered. Empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch_namespaces: Vec<String>,
    /// Skip the external dry-run check of rendered configuration.
    #[serde(default)]
    pub flow_config_check_disabled: bool,
    /// Daemon input settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluentd: Option<ForwardInput>,
}

/// Forward input the daemon listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardInput {
    /// Bind address.
    pub bind: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ForwardInput {
    fn default() -> Self {
        Self {
            bind: DEFAULT_FORWARD_BIND.to_string(),
            port: DEFAULT_FORWARD_PORT,
        }
    }
}

/// Immutable view of one tenant for the duration of a compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSystem {
    /// Name of the originating `Logging` resource.
    pub name: String,
    /// Reference resources must carry to belong to this system.
    pub logging_ref: Option<String>,
    /// Namespace holding cluster-scoped flows and outputs.
    pub control_namespace: String,
    /// Namespaces whose flows and outputs are considered. Empty means all.
    pub watch_namespaces: Vec<String>,
    /// Skip the external dry-run check of rendered configuration.
    pub flow_config_check_disabled: bool,
    /// Routing prefix isolating this system's tags from other systems.
    pub tag_prefix: String,
    /// Daemon input settings.
    pub forward_input: ForwardInput,
}

impl LoggingSystem {
    /// Creates a system with the given name and control namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, control_namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logging_ref: None,
            control_namespace: control_namespace.into(),
            watch_namespaces: Vec::new(),
            flow_config_check_disabled: false,
            tag_prefix: String::new(),
            forward_input: ForwardInput::default(),
        }
    }

    /// Builds the compile-pass view of a `Logging` resource.
    ///
    /// The tag prefix is assigned by the caller.
    #[must_use]
    pub fn from_resource(logging: &Logging, tag_prefix: impl Into<String>) -> Self {
        Self {
            name: logging.metadata.name.clone(),
            logging_ref: logging.spec.logging_ref.clone(),
            control_namespace: logging.spec.control_namespace.clone(),
            watch_namespaces: logging.spec.watch_namespaces.clone(),
            flow_config_check_disabled: logging.spec.flow_config_check_disabled,
            tag_prefix: tag_prefix.into(),
            forward_input: logging.spec.fluentd.clone().unwrap_or_default(),
        }
    }

    /// Sets the watched namespaces.
    #[must_use]
    pub fn with_watch_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the logging reference.
    #[must_use]
    pub fn with_logging_ref(mut self, logging_ref: impl Into<String>) -> Self {
        self.logging_ref = Some(logging_ref.into());
        self
    }

    /// Sets the routing tag prefix.
    #[must_use]
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Returns true if namespaced resources in `namespace` are watched.
    #[must_use]
    pub fn watches(&self, namespace: &str) -> bool {
        self.watch_namespaces.is_empty() || self.watch_namespaces.iter().any(|n| n == namespace)
    }

    /// Returns true if a resource carrying `logging_ref` belongs to this system.
    #[must_use]
    pub fn owns(&self, logging_ref: Option<&str>) -> bool {
        self.logging_ref.as_deref().unwrap_or_default() == logging_ref.unwrap_or_default()
    }
}
