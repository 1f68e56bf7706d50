use crate::error::{InstallerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// The slice of `package.json` the installer reads. The version is opaque and
/// passed through to the artifact URL unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| manifest_error(path, e))?;
        Self::parse(path, &content)
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(MANIFEST_FILE))
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| manifest_error(path, e))
    }
}

fn manifest_error(path: &Path, error: impl std::fmt::Display) -> InstallerError {
    InstallerError::Manifest {
        path: PathBuf::from(path),
        message: error.to_string(),
    }
}
