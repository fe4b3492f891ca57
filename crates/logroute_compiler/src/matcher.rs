//! Match resolution: turns a flow's matching configuration into a [`Predicate`].
//!
//! A flow selects streams either through the flat `selectors` shorthand or
//! through an ordered `match` list, never both. Each match entry is a select
//! or an exclude, never both.
//!
//! Evaluation walks the clauses in declaration order starting from "not
//! included"; a matching select includes, a matching exclude drops. The last
//! matching clause therefore decides.

use crate::error::ModelError;
use crate::selector::{Clause, Origin, Polarity};
use logroute_model::{ClusterFlow, Flow, Labels, ObjectKey, ObjectKind};
use serde::{Deserialize, Serialize};

/// Ordered list of polarity-tagged clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Clauses in declaration order.
    pub clauses: Vec<Clause>,
}

impl Predicate {
    /// Predicate with a single select clause.
    #[must_use]
    pub fn select(labels: Labels, namespaces: Vec<String>) -> Self {
        Self {
            clauses: vec![Clause::new(Polarity::Select, labels, namespaces)],
        }
    }

    /// Decides whether `origin` is routed by this predicate.
    #[must_use]
    pub fn evaluate(&self, origin: &Origin) -> bool {
        self.clauses
            .iter()
            .fold(false, |included, clause| match clause.polarity {
                Polarity::Select if clause.matches(origin) => true,
                Polarity::Exclude if clause.matches(origin) => false,
                _ => included,
            })
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if there are no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Resolves the predicate of a namespace-scoped flow.
///
/// Every clause is limited to the flow's own namespace.
///
/// # Errors
///
/// Returns a [`ModelError`] if `selectors` and `match` are both set or if a
/// match entry sets both or neither of `select` and `exclude`.
pub fn resolve_flow(flow: &Flow) -> Result<Predicate, ModelError> {
    let key = flow.key();
    let scope = vec![flow.metadata.namespace.clone()];
    let entries = flow.spec.matches.iter().map(|entry| {
        (
            entry.select.as_ref().map(|s| (s.labels.clone(), scope.clone())),
            entry.exclude.as_ref().map(|e| (e.labels.clone(), scope.clone())),
        )
    });

    resolve(
        ObjectKind::Flow,
        &key,
        &flow.spec.selectors,
        scope.clone(),
        flow.spec.matches.len(),
        entries,
    )
}

/// Resolves the predicate of a cluster-scoped flow.
///
/// Clauses carry the namespaces declared on their match entry; the flat
/// selector shorthand applies to all namespaces.
///
/// # Errors
///
/// Same conditions as [`resolve_flow`].
pub fn resolve_cluster_flow(flow: &ClusterFlow) -> Result<Predicate, ModelError> {
    let key = flow.key();
    let entries = flow.spec.matches.iter().map(|entry| {
        (
            entry
                .select
                .as_ref()
                .map(|s| (s.labels.clone(), s.namespaces.clone())),
            entry
                .exclude
                .as_ref()
                .map(|e| (e.labels.clone(), e.namespaces.clone())),
        )
    });

    resolve(
        ObjectKind::ClusterFlow,
        &key,
        &flow.spec.selectors,
        Vec::new(),
        flow.spec.matches.len(),
        entries,
    )
}

type ClauseParts = Option<(Labels, Vec<String>)>;

fn resolve<I>(
    kind: ObjectKind,
    key: &ObjectKey,
    selectors: &Labels,
    selector_scope: Vec<String>,
    match_count: usize,
    entries: I,
) -> Result<Predicate, ModelError>
where
    I: Iterator<Item = (ClauseParts, ClauseParts)>,
{
    if !selectors.is_empty() && match_count > 0 {
        return Err(ModelError::SelectorsAndMatch {
            kind,
            key: key.clone(),
        });
    }

    // Neither form set: select everything in scope.
    if match_count == 0 {
        return Ok(Predicate::select(selectors.clone(), selector_scope));
    }

    let mut clauses = Vec::with_capacity(match_count);
    for entry in entries {
        let clause = match entry {
            (Some(_), Some(_)) => {
                return Err(ModelError::SelectAndExclude {
                    kind,
                    key: key.clone(),
                })
            }
            (None, None) => {
                return Err(ModelError::EmptyMatch {
                    kind,
                    key: key.clone(),
                })
            }
            (Some((labels, namespaces)), None) => {
                Clause::new(Polarity::Select, labels, namespaces)
            }
            (None, Some((labels, namespaces))) => {
                Clause::new(Polarity::Exclude, labels, namespaces)
            }
        };
        clauses.push(clause);
    }

    Ok(Predicate { clauses })
}
