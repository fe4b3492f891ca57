//! Compile command implementation.

use super::Selection;
use anyhow::{Context, Result};
use logroute_compiler::{CompileOptions, Compiler, ConfigLock, OutputFormat, Resources};
use std::fs;
use tracing::info;

/// Runs the compile command.
pub fn run(selection: &Selection, output_path: &str, format: &str, create_lock: bool) -> Result<()> {
    let (bundle, system) = super::load(selection)?;

    let output_format = match format.to_lowercase().as_str() {
        "fluentd" | "conf" => OutputFormat::Fluentd,
        "json" => OutputFormat::Json,
        _ => {
            anyhow::bail!("Unknown output format: {format}. Use 'fluentd' or 'json'.");
        }
    };

    let compiler = Compiler::with_options(CompileOptions {
        format: output_format,
        include_comments: true,
    });
    let resources = Resources::from(&bundle);
    let output = compiler
        .compile(&system, resources)
        .with_context(|| format!("Failed to compile logging system '{}'", system.name))?;

    fs::write(output_path, &output)
        .with_context(|| format!("Failed to write output file: {output_path}"))?;

    info!("Compiled configuration written to: {}", output_path);

    if create_lock {
        let tree = compiler.to_directive_tree(&system, resources)?;
        let lock = ConfigLock::new(&tree, &output).with_timestamp();
        let lock_path = format!("{output_path}.lock");

        lock.save(&lock_path)
            .with_context(|| format!("Failed to write config lock: {lock_path}"))?;

        info!("Config lock written to: {} ({})", lock_path, lock.config_hash);
    }

    Ok(())
}
