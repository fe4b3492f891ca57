//! Error types for resource decoding and sink validation.

use thiserror::Error;

/// Errors that can occur while decoding or validating resources.
#[derive(Debug, Error)]
pub enum Error {
    /// The output spec has no sink plugin populated.
    #[error("no output plugin configured")]
    NoPlugin,

    /// The output spec has more than one sink plugin populated.
    #[error("multiple output plugins configured: {}", .0.join(", "))]
    MultiplePlugins(Vec<&'static str>),

    /// A required plugin parameter is empty.
    #[error("missing required field '{field}' for {plugin} output")]
    MissingField {
        /// Plugin type that declares the field.
        plugin: &'static str,
        /// The empty field.
        field: &'static str,
    },

    /// A bundle document declares a kind this crate does not know.
    #[error("unsupported resource kind '{0}'")]
    UnsupportedKind(String),

    /// YAML decoding error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;
