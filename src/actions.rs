//! Step outputs and failure signaling for the hosting CI runner.

use std::fmt::Display;

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Report a step output.
///
/// Appends `name=value` to the file named by GITHUB_OUTPUT, or prints it to
/// stdout when the variable is unset (local invocations).
pub async fn set_output(name: &str, value: impl Display) -> Result<()> {
    match std::env::var("GITHUB_OUTPUT").ok().filter(|p| !p.is_empty()) {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
                .with_context(|| format!("failed to open step output file {path}"))?;
            file.write_all(format!("{name}={value}\n").as_bytes())
                .await
                .with_context(|| format!("failed to write step output {name}"))?;
        }
        None => println!("{name}={value}"),
    }
    Ok(())
}

/// Mark the step failed with a human-readable reason.
///
/// Emits the `::error::` workflow command on stdout; mapping the failure to
/// the process exit status is left to the caller.
pub fn set_failed(reason: &str) {
    println!("::error::{reason}");
}
