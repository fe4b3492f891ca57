//! Main compiler implementation.

use crate::error::Result;
use crate::model::{self, DirectiveTree, Resources};
use crate::render;
use logroute_model::LoggingSystem;
use tracing::debug;

/// Output format for compiled configuration.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Daemon nested-block configuration (default).
    #[default]
    Fluentd,
    /// JSON dump of the directive tree.
    Json,
}

/// Compilation options.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Prefix the output with a comment naming the logging system.
    pub include_comments: bool,
}

/// Compiler from flows and outputs to daemon configuration.
///
/// This compiler is **pure and deterministic**:
/// - No I/O
/// - No shared state between compiles
/// - Same input always produces same output
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Creates a new compiler with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new compiler with the given options.
    #[must_use]
    pub const fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compiles the resources of `system` to text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A flow or output is invalid or references a missing output
    /// - Rendering hits an internal invariant violation
    /// - JSON serialization fails
    pub fn compile(&self, system: &LoggingSystem, resources: Resources<'_>) -> Result<String> {
        let tree = self.to_directive_tree(system, resources)?;

        match self.options.format {
            OutputFormat::Fluentd => render::render(&tree, self.options.include_comments),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&tree)?),
        }
    }

    /// Builds the directive tree without rendering it.
    ///
    /// # Errors
    ///
    /// Returns an error if a flow or output is invalid or a reference does not
    /// resolve.
    pub fn to_directive_tree(
        &self,
        system: &LoggingSystem,
        resources: Resources<'_>,
    ) -> Result<DirectiveTree> {
        debug!(
            system = %system.name,
            flows = resources.flows.len(),
            cluster_flows = resources.cluster_flows.len(),
            "compiling logging system"
        );
        model::build(system, resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logroute_model::output::NullOutput;
    use logroute_model::{Flow, Output, SinkConfig};

    fn inputs() -> (Vec<Flow>, Vec<Output>) {
        (
            vec![Flow::new("default", "f").with_selector("app", "nginx").with_output_ref("out")],
            vec![Output::new("default", "out", SinkConfig::Null(NullOutput::default()))],
        )
    }

    #[test]
    fn compile_simple_system() {
        let (flows, outputs) = inputs();
        let system = LoggingSystem::new("test", "control");
        let output = Compiler::new()
            .compile(
                &system,
                Resources {
                    flows: &flows,
                    outputs: &outputs,
                    ..Resources::default()
                },
            )
            .unwrap();

        assert!(output.contains("@type label_router"));
        assert!(output.contains("labels app:nginx"));
        assert!(output.contains("@id flow_default_f_null_0"));
    }

    #[test]
    fn compile_to_json() {
        let (flows, outputs) = inputs();
        let system = LoggingSystem::new("test", "control");
        let compiler = Compiler::with_options(CompileOptions {
            format: OutputFormat::Json,
            ..Default::default()
        });
        let output = compiler
            .compile(
                &system,
                Resources {
                    flows: &flows,
                    outputs: &outputs,
                    ..Resources::default()
                },
            )
            .unwrap();

        assert!(output.contains("\"system\": \"test\""));
    }

    #[test]
    fn compiler_is_deterministic() {
        let (flows, outputs) = inputs();
        let system = LoggingSystem::new("test", "control");
        let resources = Resources {
            flows: &flows,
            outputs: &outputs,
            ..Resources::default()
        };

        let compiler = Compiler::new();
        let output1 = compiler.compile(&system, resources).unwrap();
        let output2 = compiler.compile(&system, resources).unwrap();

        assert_eq!(output1, output2, "Compiler must be deterministic");
    }
}
