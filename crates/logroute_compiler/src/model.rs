//! Model building: flows and outputs of one logging system into a
//! [`DirectiveTree`].
//!
//! Rules are visited namespace-scoped first, then cluster-scoped, each group
//! ordered by `namespace/name`, so the tree does not depend on the order the
//! caller listed resources in. The first failing rule aborts the build.

use crate::error::{ModelError, Result};
use crate::matcher::{self, Predicate};
use crate::registry::{OutputRegistry, ResolvedSink, Scope};
use logroute_model::{
    Bundle, ClusterFlow, ClusterOutput, Flow, ForwardInput, LoggingSystem, ObjectKey, ObjectKind,
    Output,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xxhash_rust::xxh64::xxh64;

/// Seed for label hashing.
const LABEL_SEED: u64 = 0x4C4F_4752_4F55; // "LOGROU" in hex

/// Borrowed resources of one compile pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resources<'a> {
    /// Namespace-scoped routing rules.
    pub flows: &'a [Flow],
    /// Cluster-scoped routing rules.
    pub cluster_flows: &'a [ClusterFlow],
    /// Namespace-scoped sinks.
    pub outputs: &'a [Output],
    /// Cluster-scoped sinks.
    pub cluster_outputs: &'a [ClusterOutput],
}

impl<'a> From<&'a Bundle> for Resources<'a> {
    fn from(bundle: &'a Bundle) -> Self {
        Self {
            flows: &bundle.flows,
            cluster_flows: &bundle.cluster_flows,
            outputs: &bundle.outputs,
            cluster_outputs: &bundle.cluster_outputs,
        }
    }
}

/// Compiled routing model of one logging system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveTree {
    /// Logging system name.
    pub system: String,
    /// Routing prefix isolating this system's tags.
    pub tag_prefix: String,
    /// Daemon input settings.
    pub forward_input: ForwardInput,
    /// One directive per rule, in build order.
    pub directives: Vec<Directive>,
}

/// One compiled routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// `Flow` or `ClusterFlow`.
    pub kind: ObjectKind,
    /// Identity of the rule.
    pub key: ObjectKey,
    /// Daemon label the rule's sinks live under.
    pub label: String,
    /// Compiled stream selection.
    pub predicate: Predicate,
    /// Resolved sinks, in reference order.
    pub sinks: Vec<ResolvedSink>,
}

impl Directive {
    /// Stable identifier of the directive:
    /// `<kind>_<namespace>_<name>_<label hash>`.
    ///
    /// The readable part is sanitized and may fold distinct keys together
    /// (`a-b/c` and `a/b-c`); the label hash suffix keeps it unique.
    #[must_use]
    pub fn id(&self) -> String {
        let readable = sanitize(&format!(
            "{}_{}_{}",
            self.kind, self.key.namespace, self.key.name
        ));
        format!("{readable}_{}", self.label.trim_start_matches('@'))
    }

    /// Stable identifier of the sink at `position`.
    #[must_use]
    pub fn sink_id(&self, position: usize) -> Option<String> {
        self.sinks.get(position).map(|sink| {
            format!("{}_{}_{position}", self.id(), sink.config.plugin_type())
        })
    }
}

/// Builds the directive tree of `system`.
///
/// # Errors
///
/// Returns [`crate::Error::Model`] carrying the identity of the first invalid
/// output or rule. No partial tree is returned.
pub fn build(system: &LoggingSystem, resources: Resources<'_>) -> Result<DirectiveTree> {
    let registry = OutputRegistry::new(system, resources.outputs, resources.cluster_outputs)?;

    let mut flows: Vec<&Flow> = resources
        .flows
        .iter()
        .filter(|flow| {
            let member = system.owns(flow.spec.logging_ref.as_deref())
                && system.watches(&flow.metadata.namespace);
            if !member {
                debug!(flow = %flow.key(), "skipping flow outside logging system");
            }
            member
        })
        .collect();
    flows.sort_by_key(|flow| flow.key());

    let mut cluster_flows: Vec<&ClusterFlow> = resources
        .cluster_flows
        .iter()
        .filter(|flow| {
            let member = system.owns(flow.spec.logging_ref.as_deref())
                && flow.metadata.namespace == system.control_namespace;
            if !member {
                debug!(clusterflow = %flow.key(), "skipping cluster flow outside logging system");
            }
            member
        })
        .collect();
    cluster_flows.sort_by_key(|flow| flow.key());

    let mut directives = Vec::with_capacity(flows.len() + cluster_flows.len());
    for flow in flows {
        directives.push(flow_directive(system, &registry, flow)?);
    }
    for flow in cluster_flows {
        directives.push(cluster_flow_directive(system, &registry, flow)?);
    }

    debug!(
        system = %system.name,
        directives = directives.len(),
        outputs = registry.len(),
        "built directive tree"
    );

    Ok(DirectiveTree {
        system: system.name.clone(),
        tag_prefix: system.tag_prefix.clone(),
        forward_input: system.forward_input.clone(),
        directives,
    })
}

fn flow_directive(
    system: &LoggingSystem,
    registry: &OutputRegistry,
    flow: &Flow,
) -> std::result::Result<Directive, ModelError> {
    let key = flow.key();
    let predicate = matcher::resolve_flow(flow)?;

    let mut sinks = registry.resolve(
        ObjectKind::Flow,
        &key,
        &flow.spec.output_refs,
        &Scope::Namespace(key.namespace.clone()),
    )?;
    sinks.extend(registry.resolve(
        ObjectKind::Flow,
        &key,
        &flow.spec.global_output_refs,
        &Scope::Cluster,
    )?);

    Ok(Directive {
        kind: ObjectKind::Flow,
        label: label_for(system, ObjectKind::Flow, &key),
        key,
        predicate,
        sinks,
    })
}

fn cluster_flow_directive(
    system: &LoggingSystem,
    registry: &OutputRegistry,
    flow: &ClusterFlow,
) -> std::result::Result<Directive, ModelError> {
    let key = flow.key();
    let predicate = matcher::resolve_cluster_flow(flow)?;
    let sinks = registry.resolve(
        ObjectKind::ClusterFlow,
        &key,
        &flow.spec.output_refs,
        &Scope::Cluster,
    )?;

    Ok(Directive {
        kind: ObjectKind::ClusterFlow,
        label: label_for(system, ObjectKind::ClusterFlow, &key),
        key,
        predicate,
        sinks,
    })
}

/// Daemon label of a rule: `@` and the xxh64 of prefix, kind and key.
fn label_for(system: &LoggingSystem, kind: ObjectKind, key: &ObjectKey) -> String {
    let identity = format!("{}:{kind}:{}:{}", system.tag_prefix, key.namespace, key.name);
    format!("@{:016x}", xxh64(identity.as_bytes(), LABEL_SEED))
}

/// Maps every character outside `[A-Za-z0-9_]` to `_`.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
