//! Command implementations and the bundle loading they share.

pub mod check;
pub mod compile;
pub mod explain;

use anyhow::{bail, Context, Result};
use logroute_model::{Bundle, LoggingSystem};
use std::fs;
use std::path::Path;
use tracing::info;

/// Which bundle to read and which logging system in it to compile.
pub struct Selection {
    pub bundle: String,
    pub logging: Option<String>,
    pub tag_prefix: String,
}

/// Reads the bundle named by `selection` and picks its logging system.
pub fn load(selection: &Selection) -> Result<(Bundle, LoggingSystem)> {
    info!("Loading bundle: {}", selection.bundle);

    let content = fs::read_to_string(&selection.bundle)
        .with_context(|| format!("Failed to read bundle file: {}", selection.bundle))?;

    let bundle = match Path::new(&selection.bundle)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("json") => Bundle::from_json(&content),
        _ => Bundle::from_yaml(&content),
    }
    .with_context(|| format!("Failed to decode bundle: {}", selection.bundle))?;

    let system = pick_system(&bundle, selection)?;
    info!(
        "Loaded {} resources for logging system '{}'",
        bundle.len(),
        system.name
    );
    Ok((bundle, system))
}

fn pick_system(bundle: &Bundle, selection: &Selection) -> Result<LoggingSystem> {
    let logging = match (&selection.logging, bundle.loggings.as_slice()) {
        (Some(name), loggings) => loggings
            .iter()
            .find(|logging| &logging.metadata.name == name)
            .with_context(|| format!("Logging '{name}' not found in bundle"))?,
        (None, [only]) => only,
        (None, []) => bail!("Bundle contains no Logging resource"),
        (None, _) => bail!("Bundle contains several Logging resources; pick one with --logging"),
    };
    Ok(LoggingSystem::from_resource(logging, selection.tag_prefix.as_str()))
}
