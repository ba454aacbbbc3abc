//! Prover installation detection.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ProverConfig;

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("prover executable '{name}' not found on PATH")]
    NotFound { name: String },

    #[error("'{program} --version' failed: {details}")]
    VersionCheck { program: String, details: String },
}

/// Resolve the configured executable and check it answers `--version`.
/// Run once before a sweep so a missing installation fails up front rather
/// than as a fault on every assignment.
pub fn detect_prover(config: &ProverConfig) -> Result<PathBuf, DetectionError> {
    let path = if config.executable.components().count() > 1 {
        config.executable.clone()
    } else {
        which::which(&config.executable).map_err(|_| DetectionError::NotFound {
            name: config.executable.display().to_string(),
        })?
    };

    let output = Command::new(&path)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| DetectionError::VersionCheck {
            program: path.display().to_string(),
            details: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(DetectionError::VersionCheck {
            program: path.display().to_string(),
            details: format!("exit code {:?}", output.status.code()),
        });
    }

    let version = String::from_utf8_lossy(&output.stdout);
    debug!(version = version.lines().next().unwrap_or(""), "detected prover");
    Ok(path)
}
