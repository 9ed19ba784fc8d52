use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable naming the gofmt binary to run
pub const GOFMT_BIN_ENV: &str = "ENDPOINTGEN_GOFMT_BIN";

/// Run `gofmt -w` on `files` (relative to `root`)
///
/// # Errors
///
/// Fails if gofmt cannot be started or exits unsuccessfully.
pub fn format_go_files(root: &Path, files: &[PathBuf]) -> anyhow::Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    // Allow tests to override the gofmt binary path without mutating PATH
    let gofmt_bin = std::env::var(GOFMT_BIN_ENV).unwrap_or_else(|_| "gofmt".to_string());

    let mut cmd = Command::new(&gofmt_bin);
    cmd.arg("-w").args(files).current_dir(root);
    let output = cmd
        .output()
        .map_err(|e| anyhow::anyhow!("failed to run {gofmt_bin}: {e}"))?;
    if !output.status.success() {
        anyhow::bail!(
            "{gofmt_bin} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
