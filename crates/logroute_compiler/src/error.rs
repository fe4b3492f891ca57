//! Error types for model building and rendering.

use logroute_model::{ObjectKey, ObjectKind};
use thiserror::Error;

/// Broad classification of a compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally invalid user input.
    Validation,
    /// A named reference does not resolve.
    Reference,
    /// The renderer received input validation should have rejected.
    InternalInvariant,
    /// Reading or writing auxiliary files failed.
    Serialization,
}

/// A model building failure attributable to one object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// `selectors` and `match` are both set on a flow.
    #[error("match and selectors cannot be defined simultaneously for {kind} {key}")]
    SelectorsAndMatch {
        /// Flow kind.
        kind: ObjectKind,
        /// Flow identity.
        key: ObjectKey,
    },

    /// A match entry sets both `select` and `exclude`.
    #[error("failed to process match for {key}: select and exclude cannot be set simultaneously")]
    SelectAndExclude {
        /// Flow kind.
        kind: ObjectKind,
        /// Flow identity.
        key: ObjectKey,
    },

    /// A match entry sets neither `select` nor `exclude`.
    #[error("failed to process match for {key}: select or exclude must be set")]
    EmptyMatch {
        /// Flow kind.
        kind: ObjectKind,
        /// Flow identity.
        key: ObjectKey,
    },

    /// An output has no plugin member set.
    #[error("no output plugin configured for {kind} {key}")]
    NoPlugin {
        /// Output kind.
        kind: ObjectKind,
        /// Output identity.
        key: ObjectKey,
    },

    /// An output has more than one plugin member set.
    #[error("multiple output plugins configured for {kind} {key}: {}", .plugins.join(", "))]
    MultiplePlugins {
        /// Output kind.
        kind: ObjectKind,
        /// Output identity.
        key: ObjectKey,
        /// The populated plugin types.
        plugins: Vec<&'static str>,
    },

    /// An output plugin lacks a required parameter.
    #[error("missing required field '{field}' of {plugin} plugin for {kind} {key}")]
    MissingField {
        /// Output kind.
        kind: ObjectKind,
        /// Output identity.
        key: ObjectKey,
        /// Plugin type.
        plugin: &'static str,
        /// Empty field.
        field: &'static str,
    },

    /// Two member outputs share the same identity.
    #[error("duplicate {kind} {key}")]
    DuplicateOutput {
        /// Output kind.
        kind: ObjectKind,
        /// Shared identity.
        key: ObjectKey,
    },

    /// A flow references an output that does not exist in its scope.
    #[error("referenced {output_kind} {output} not found for {kind} {key}")]
    MissingOutput {
        /// Referencing flow kind.
        kind: ObjectKind,
        /// Referencing flow identity.
        key: ObjectKey,
        /// Kind of the missing output.
        output_kind: ObjectKind,
        /// Name of the missing output.
        output: String,
    },
}

impl ModelError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingOutput { .. } => ErrorKind::Reference,
            _ => ErrorKind::Validation,
        }
    }

    /// Kind and identity of the offending object.
    #[must_use]
    pub const fn object(&self) -> (ObjectKind, &ObjectKey) {
        match self {
            Self::SelectorsAndMatch { kind, key }
            | Self::SelectAndExclude { kind, key }
            | Self::EmptyMatch { kind, key }
            | Self::NoPlugin { kind, key }
            | Self::MultiplePlugins { kind, key, .. }
            | Self::MissingField { kind, key, .. }
            | Self::DuplicateOutput { kind, key }
            | Self::MissingOutput { kind, key, .. } => (*kind, key),
        }
    }

    /// Attaches output identity to a sink validation failure.
    pub(crate) fn from_sink(kind: ObjectKind, key: ObjectKey, err: logroute_model::Error) -> Self {
        match err {
            logroute_model::Error::MultiplePlugins(plugins) => {
                Self::MultiplePlugins { kind, key, plugins }
            }
            logroute_model::Error::MissingField { plugin, field } => Self::MissingField {
                kind,
                key,
                plugin,
                field,
            },
            _ => Self::NoPlugin { kind, key },
        }
    }
}

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
pub enum Error {
    /// Building the directive tree failed.
    #[error("failed to create model: {0}")]
    Model(#[from] ModelError),

    /// A block reached the renderer in a state validation should have rejected.
    #[error("internal invariant violated while rendering {block}: {reason}")]
    Internal {
        /// The offending block header.
        block: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Failed to read or write a lock file.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Model(err) => err.kind(),
            Self::Internal { .. } => ErrorKind::InternalInvariant,
            Self::Serialization(_) | Self::Json(_) => ErrorKind::Serialization,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_carry_the_model_prefix() {
        let err = Error::from(ModelError::SelectorsAndMatch {
            kind: ObjectKind::ClusterFlow,
            key: ObjectKey::new("control", "test-flow"),
        });
        assert_eq!(
            err.to_string(),
            "failed to create model: match and selectors cannot be defined simultaneously for clusterflow control/test-flow"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn missing_output_is_a_reference_error() {
        let err = ModelError::MissingOutput {
            kind: ObjectKind::Flow,
            key: ObjectKey::new("default", "f"),
            output_kind: ObjectKind::Output,
            output: "gone".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(err.object().0, ObjectKind::Flow);
        assert_eq!(
            err.to_string(),
            "referenced output gone not found for flow default/f"
        );
    }
}
