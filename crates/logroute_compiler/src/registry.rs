//! Output registry: resolves output references into validated sink configs.

use crate::error::ModelError;
use logroute_model::{
    ClusterOutput, LoggingSystem, ObjectKey, ObjectKind, Output, SinkConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Where a reference is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// `Output`s in the given namespace.
    Namespace(String),
    /// `ClusterOutput`s in the control namespace.
    Cluster,
}

/// A sink reference resolved to its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSink {
    /// `Output` or `ClusterOutput`.
    pub kind: ObjectKind,
    /// Identity of the resolved output.
    pub output: ObjectKey,
    /// Validated plugin configuration.
    pub config: SinkConfig,
}

/// Validated outputs of one logging system, indexed by scope.
#[derive(Debug, Clone, Default)]
pub struct OutputRegistry {
    control_namespace: String,
    local: BTreeMap<ObjectKey, SinkConfig>,
    cluster: BTreeMap<String, SinkConfig>,
}

impl OutputRegistry {
    /// Indexes and validates the outputs belonging to `system`.
    ///
    /// Outputs outside the system (foreign logging ref, unwatched namespace,
    /// cluster outputs outside the control namespace) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for the first member output, in key order,
    /// whose plugin union is empty, ambiguous, or missing a required field,
    /// or whose identity repeats an earlier member output.
    pub fn new(
        system: &LoggingSystem,
        outputs: &[Output],
        cluster_outputs: &[ClusterOutput],
    ) -> Result<Self, ModelError> {
        let mut registry = Self {
            control_namespace: system.control_namespace.clone(),
            ..Self::default()
        };

        let mut outputs: Vec<&Output> = outputs.iter().collect();
        outputs.sort_by_key(|o| o.key());
        for output in outputs {
            let key = output.key();
            if !system.owns(output.spec.logging_ref.as_deref())
                || !system.watches(&key.namespace)
            {
                debug!(output = %key, "skipping output outside logging system");
                continue;
            }
            if registry.local.contains_key(&key) {
                return Err(ModelError::DuplicateOutput {
                    kind: ObjectKind::Output,
                    key,
                });
            }
            let sink = validated(ObjectKind::Output, &key, &output.spec)?;
            registry.local.insert(key, sink);
        }

        let mut cluster_outputs: Vec<&ClusterOutput> = cluster_outputs.iter().collect();
        cluster_outputs.sort_by_key(|o| o.key());
        for output in cluster_outputs {
            let key = output.key();
            if !system.owns(output.spec.logging_ref.as_deref())
                || key.namespace != system.control_namespace
            {
                debug!(output = %key, "skipping cluster output outside logging system");
                continue;
            }
            if registry.cluster.contains_key(&key.name) {
                return Err(ModelError::DuplicateOutput {
                    kind: ObjectKind::ClusterOutput,
                    key,
                });
            }
            let sink = validated(ObjectKind::ClusterOutput, &key, &output.spec)?;
            registry.cluster.insert(key.name, sink);
        }

        Ok(registry)
    }

    /// Resolves `refs` in declaration order. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingOutput`] naming the referencing rule and
    /// the first name that does not resolve in `scope`.
    pub fn resolve(
        &self,
        rule_kind: ObjectKind,
        rule: &ObjectKey,
        refs: &[String],
        scope: &Scope,
    ) -> Result<Vec<ResolvedSink>, ModelError> {
        refs.iter()
            .map(|name| {
                let (kind, key) = match scope {
                    Scope::Namespace(namespace) => {
                        (ObjectKind::Output, ObjectKey::new(namespace, name))
                    }
                    Scope::Cluster => (
                        ObjectKind::ClusterOutput,
                        ObjectKey::new(&self.control_namespace, name),
                    ),
                };
                let config = match scope {
                    Scope::Namespace(_) => self.local.get(&key),
                    Scope::Cluster => self.cluster.get(name),
                };
                config
                    .map(|config| ResolvedSink {
                        kind,
                        output: key,
                        config: config.clone(),
                    })
                    .ok_or_else(|| ModelError::MissingOutput {
                        kind: rule_kind,
                        key: rule.clone(),
                        output_kind: kind,
                        output: name.clone(),
                    })
            })
            .collect()
    }

    /// Number of registered outputs across both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.local.len() + self.cluster.len()
    }

    /// Returns true if no output is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validated(
    kind: ObjectKind,
    key: &ObjectKey,
    spec: &logroute_model::OutputSpec,
) -> Result<SinkConfig, ModelError> {
    let sink = spec
        .sink()
        .map_err(|e| ModelError::from_sink(kind, key.clone(), e))?;
    sink.validate()
        .map_err(|e| ModelError::from_sink(kind, key.clone(), e))?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logroute_model::output::{HttpAuth, HttpOutput, NullOutput, S3Output};
    use logroute_model::OutputSpec;

    fn null_output(namespace: &str, name: &str) -> Output {
        Output::new(namespace, name, SinkConfig::Null(NullOutput::default()))
    }

    fn system() -> LoggingSystem {
        LoggingSystem::new("test", "control").with_watch_namespaces(["default"])
    }

    #[test]
    fn resolves_in_declaration_order_with_duplicates() {
        let outputs = vec![null_output("default", "b"), null_output("default", "a")];
        let registry = OutputRegistry::new(&system(), &outputs, &[]).unwrap();

        let refs = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let sinks = registry
            .resolve(
                ObjectKind::Flow,
                &ObjectKey::new("default", "f"),
                &refs,
                &Scope::Namespace("default".to_string()),
            )
            .unwrap();

        let names: Vec<_> = sinks.iter().map(|s| s.output.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn local_refs_do_not_cross_namespaces() {
        let system = LoggingSystem::new("test", "control");
        let outputs = vec![null_output("other", "a")];
        let registry = OutputRegistry::new(&system, &outputs, &[]).unwrap();

        let err = registry
            .resolve(
                ObjectKind::Flow,
                &ObjectKey::new("default", "f"),
                &["a".to_string()],
                &Scope::Namespace("default".to_string()),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "referenced output a not found for flow default/f");
    }

    #[test]
    fn cluster_refs_resolve_in_control_namespace() {
        let cluster = vec![
            ClusterOutput::new("control", "archive", SinkConfig::Null(NullOutput::default())),
            ClusterOutput::new("elsewhere", "ignored", SinkConfig::Null(NullOutput::default())),
        ];
        let registry = OutputRegistry::new(&system(), &[], &cluster).unwrap();
        assert_eq!(registry.len(), 1);

        let sinks = registry
            .resolve(
                ObjectKind::ClusterFlow,
                &ObjectKey::new("control", "all"),
                &["archive".to_string()],
                &Scope::Cluster,
            )
            .unwrap();
        assert_eq!(sinks[0].kind, ObjectKind::ClusterOutput);
        assert_eq!(sinks[0].output.to_string(), "control/archive");

        let err = registry
            .resolve(
                ObjectKind::ClusterFlow,
                &ObjectKey::new("control", "all"),
                &["ignored".to_string()],
                &Scope::Cluster,
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingOutput { output_kind: ObjectKind::ClusterOutput, .. }));
    }

    #[test]
    fn invalid_outputs_fail_registration() {
        let mut output = null_output("default", "broken");
        output.spec = OutputSpec::default();
        let err = OutputRegistry::new(&system(), &[output], &[]).unwrap_err();
        assert_eq!(err.to_string(), "no output plugin configured for output default/broken");

        let output = Output::new("default", "s3", SinkConfig::S3(S3Output::default()));
        let err = OutputRegistry::new(&system(), &[output], &[]).unwrap_err();
        assert!(matches!(err, ModelError::MissingField { field: "s3_bucket", .. }));
    }

    #[test]
    fn unwatched_outputs_are_skipped() {
        let outputs = vec![null_output("unwatched", "a")];
        let registry = OutputRegistry::new(&system(), &outputs, &[]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_outputs_are_rejected() {
        let outputs = vec![null_output("default", "a"), null_output("default", "a")];
        let err = OutputRegistry::new(&system(), &outputs, &[]).unwrap_err();
        assert_eq!(err.to_string(), "duplicate output default/a");
        assert_eq!(err.kind(), crate::ErrorKind::Validation);

        let cluster = vec![
            ClusterOutput::new("control", "archive", SinkConfig::Null(NullOutput::default())),
            ClusterOutput::new("control", "archive", SinkConfig::Null(NullOutput::default())),
        ];
        let err = OutputRegistry::new(&system(), &[], &cluster).unwrap_err();
        assert_eq!(err.to_string(), "duplicate clusteroutput control/archive");
    }

    #[test]
    fn nested_auth_failure_names_the_output() {
        let output = Output::new(
            "default",
            "ingest",
            SinkConfig::Http(HttpOutput {
                endpoint: "https://logs.example.com".to_string(),
                auth: Some(HttpAuth {
                    username: "u".to_string(),
                    password: String::new(),
                }),
                ..HttpOutput::default()
            }),
        );
        let err = OutputRegistry::new(&system(), &[output], &[]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "missing required field 'auth.password' of http plugin for output default/ingest"
        );
    }
}
