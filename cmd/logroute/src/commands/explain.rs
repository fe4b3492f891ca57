//! Explain command implementation.

use super::Selection;
use anyhow::{Context, Result};
use logroute_compiler::{explain, Compiler, Resources};
use std::fs;
use tracing::info;

/// Runs the explain command.
pub fn run(selection: &Selection, output_path: &str) -> Result<()> {
    let (bundle, system) = super::load(selection)?;

    let tree = Compiler::new()
        .to_directive_tree(&system, Resources::from(&bundle))
        .with_context(|| format!("Failed to build logging system '{}'", system.name))?;

    let report = explain::generate_report(&tree);
    fs::write(output_path, &report)
        .with_context(|| format!("Failed to write report: {output_path}"))?;

    info!("Routing report written to: {}", output_path);

    Ok(())
}
