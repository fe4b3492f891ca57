//! Label selector evaluation.
//!
//! Selection is a strict superset test: every selector key must be present in
//! the origin labels with an equal value. No regexes, no negated values.

use logroute_model::Labels;
use serde::{Deserialize, Serialize};

/// Where a log stream comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Source namespace.
    pub namespace: String,
    /// Source labels.
    pub labels: Labels,
}

impl Origin {
    /// Creates an origin.
    #[must_use]
    pub fn new<I, K, V>(namespace: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether a matching clause includes or drops a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Include matching streams.
    Select,
    /// Drop matching streams.
    Exclude,
}

/// A polarity-tagged label test, optionally limited to namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Include or drop.
    pub polarity: Polarity,
    /// Labels the origin must carry.
    pub labels: Labels,
    /// Namespaces the clause applies to. Empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
}

impl Clause {
    /// Creates a clause.
    #[must_use]
    pub const fn new(polarity: Polarity, labels: Labels, namespaces: Vec<String>) -> Self {
        Self {
            polarity,
            labels,
            namespaces,
        }
    }

    /// Label-only test, ignoring namespace scope.
    #[must_use]
    pub fn matches_labels(&self, labels: &Labels) -> bool {
        is_superset(labels, &self.labels)
    }

    /// Full test: namespace scope and labels.
    ///
    /// For an exclude clause `true` means the stream is dropped.
    #[must_use]
    pub fn matches(&self, origin: &Origin) -> bool {
        let in_scope =
            self.namespaces.is_empty() || self.namespaces.iter().any(|n| *n == origin.namespace);
        in_scope && self.matches_labels(&origin.labels)
    }
}

/// Returns true if `labels` carries every key/value of `selector`.
///
/// An empty selector matches everything.
#[must_use]
pub fn is_superset(labels: &Labels, selector: &Labels) -> bool {
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}
