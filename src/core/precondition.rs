//! The host tool gate that must pass before any network activity.

use crate::core::version::is_version_gte;
use crate::error::{InstallerError, Result};
use std::process::Command;

pub const MIN_NPM_VERSION: &str = "5.0.0";

/// A tool on the host whose version gates the install.
pub trait HostTool {
    fn name(&self) -> &str;

    /// The tool's version string, or a human-readable reason it could not be
    /// determined.
    fn version(&self) -> std::result::Result<String, String>;
}

pub struct Npm;

impl HostTool for Npm {
    fn name(&self) -> &str {
        "npm"
    }

    fn version(&self) -> std::result::Result<String, String> {
        let npm = which::which("npm").map_err(|e| format!("npm was not found on PATH: {e}"))?;

        let output = Command::new(npm)
            .args(["version", "--json"])
            .output()
            .map_err(|e| format!("failed to run npm: {e}"))?;

        if !output.status.success() {
            return Err(format!(
                "npm version exited with status {:?}",
                output.status.code()
            ));
        }

        parse_npm_version_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extracts the `npm` field from `npm version --json` output.
pub fn parse_npm_version_json(output: &str) -> std::result::Result<String, String> {
    let versions: serde_json::Value =
        serde_json::from_str(output).map_err(|e| format!("unreadable npm version output: {e}"))?;

    versions
        .get("npm")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| "npm version output has no 'npm' entry".to_string())
}

pub fn ensure(tool: &dyn HostTool, minimum: &str) -> Result<()> {
    let failure = || InstallerError::Precondition {
        message: format!(
            "JFrog CLI can be installed using {} version {minimum} or above.",
            tool.name()
        ),
    };

    match tool.version() {
        Ok(found) if is_version_gte(&found, minimum) => {
            tracing::debug!(tool = tool.name(), version = %found, "host tool version accepted");
            Ok(())
        }
        Ok(found) => {
            tracing::debug!(tool = tool.name(), version = %found, minimum, "host tool too old");
            Err(failure())
        }
        Err(reason) => {
            eprintln!("⚠️  {reason}");
            Err(failure())
        }
    }
}
