//! Check command: render a bundle and hand it to the daemon's dry-run mode.

use super::Selection;
use anyhow::{bail, Context, Result};
use logroute_compiler::{run_check, CheckOutcome, Compiler, ConfigCheck, Resources};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Dry run through `<daemon> --dry-run -c <file>`.
///
/// The configuration is written to a uniquely named temporary file that is
/// removed when the check returns.
pub struct DaemonDryRun {
    executable: String,
}

impl DaemonDryRun {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn scratch_file(rendered: &str) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("logroute-")
            .suffix(".conf")
            .tempfile()?;
        file.write_all(rendered.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl ConfigCheck for DaemonDryRun {
    fn check(&self, rendered: &str) -> CheckOutcome {
        let file = match Self::scratch_file(rendered) {
            Ok(file) => file,
            Err(err) => {
                return CheckOutcome::Failed(format!("failed to write dry-run config: {err}"))
            }
        };

        debug!(daemon = %self.executable, config = %file.path().display(), "running dry run");
        let result = Command::new(&self.executable)
            .arg("--dry-run")
            .arg("-c")
            .arg(file.path())
            .output();

        match result {
            Ok(output) if output.status.success() => CheckOutcome::Passed,
            Ok(output) => {
                let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
                diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
                CheckOutcome::Failed(diagnostics)
            }
            Err(err) => CheckOutcome::Failed(format!("failed to run {}: {err}", self.executable)),
        }
    }
}

/// Runs the check command.
pub fn run(selection: &Selection, daemon: &str) -> Result<()> {
    let (bundle, system) = super::load(selection)?;

    let rendered = Compiler::new()
        .compile(&system, Resources::from(&bundle))
        .with_context(|| format!("Failed to compile logging system '{}'", system.name))?;

    match run_check(&system, &DaemonDryRun::new(daemon), &rendered) {
        CheckOutcome::Passed => info!("Configuration accepted by {}", daemon),
        CheckOutcome::Skipped => info!("Config check disabled for '{}'", system.name),
        CheckOutcome::Failed(diagnostics) => {
            bail!("Configuration rejected by {daemon}:\n{diagnostics}")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_file_holds_config_and_is_removed_on_drop() {
        let file = DaemonDryRun::scratch_file("<source>\n</source>\n").unwrap();
        let path = file.path().to_path_buf();
        assert!(path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("logroute-") && name.ends_with(".conf")));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<source>\n</source>\n");

        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn scratch_files_do_not_share_a_path() {
        let a = DaemonDryRun::scratch_file("same").unwrap();
        let b = DaemonDryRun::scratch_file("same").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn missing_daemon_fails_the_check() {
        let outcome = DaemonDryRun::new("logroute-no-such-daemon").check("");
        assert!(matches!(outcome, CheckOutcome::Failed(msg) if msg.contains("failed to run")));
    }
}
