use crate::core::download::DEFAULT_MAX_REDIRECTS;
use crate::core::manifest::PackageManifest;
use crate::core::platform::{self, CpuArch, OsFamily, TargetDescriptor};
use crate::core::proxy::{self, ProxyConfig};
use crate::core::release::{self, Distribution, ReleaseCoordinate};
use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const RELEASES_URL_VAR: &str = "JFROG_CLI_INSTALL_RELEASES_URL";
pub const FLAVOR_VAR: &str = "JFROG_CLI_INSTALL_FLAVOR";
pub const URL_LAYOUT_VAR: &str = "JFROG_CLI_INSTALL_URL_LAYOUT";
pub const MAX_REDIRECTS_VAR: &str = "JFROG_CLI_INSTALL_MAX_REDIRECTS";
pub const TIMEOUT_VAR: &str = "JFROG_CLI_INSTALL_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Everything one install run needs, assembled once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub version: String,
    pub target: TargetDescriptor,
    pub distribution: Distribution,
    pub proxy: Option<ProxyConfig>,
    pub install_dir: PathBuf,
    pub max_redirects: usize,
    pub timeout: Duration,
}

impl Config {
    /// Reads `package.json` from `install_dir`, the host platform and the
    /// process environment.
    pub fn load(install_dir: &Path) -> Result<Self> {
        let manifest = PackageManifest::load_from_dir(install_dir)?;
        Self::from_lookup(
            install_dir.to_path_buf(),
            manifest.version,
            OsFamily::host(),
            CpuArch::host(),
            |name| std::env::var(name).ok(),
        )
    }

    pub fn from_lookup<F>(
        install_dir: PathBuf,
        version: String,
        os: OsFamily,
        arch: CpuArch,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = version.trim().to_string();
        if version.is_empty() {
            return Err(InstallerError::config_error("package version is empty"));
        }

        let setting = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut distribution = Distribution::default();
        if let Some(url) = setting(RELEASES_URL_VAR) {
            release::parse_releases_url(&url)?;
            distribution.releases_url = url.trim().to_string();
        }
        if let Some(flavor) = setting(FLAVOR_VAR) {
            distribution.flavor = flavor.parse()?;
        }
        if let Some(layout) = setting(URL_LAYOUT_VAR) {
            distribution.layout = layout.parse()?;
        }

        let max_redirects = match setting(MAX_REDIRECTS_VAR) {
            Some(value) => parse_number(MAX_REDIRECTS_VAR, &value)?,
            None => DEFAULT_MAX_REDIRECTS,
        };

        let timeout = match setting(TIMEOUT_VAR) {
            Some(value) => match parse_number::<u64>(TIMEOUT_VAR, &value)? {
                0 => {
                    return Err(InstallerError::config_error(format!(
                        "{TIMEOUT_VAR} must be greater than zero"
                    )))
                }
                secs => Duration::from_secs(secs),
            },
            None => DEFAULT_TIMEOUT,
        };

        let proxy = proxy::detect(&lookup)?;
        let target = platform::resolve(os, arch, distribution.flavor.executable_base());

        Ok(Config {
            version,
            target,
            distribution,
            proxy,
            install_dir,
            max_redirects,
            timeout,
        })
    }

    pub fn release(&self) -> ReleaseCoordinate {
        ReleaseCoordinate {
            version: self.version.clone(),
            tag: self.target.tag,
        }
    }

    pub fn artifact_url(&self) -> Result<Url> {
        self.distribution
            .artifact_url(&self.release(), &self.target.executable_name)
    }

    pub fn get_bin_dir(&self) -> PathBuf {
        self.install_dir.join("bin")
    }

    pub fn get_executable_path(&self) -> PathBuf {
        self.get_bin_dir().join(&self.target.executable_name)
    }
}

fn parse_number<N: FromStr>(name: &str, value: &str) -> Result<N> {
    value.trim().parse().map_err(|_| {
        InstallerError::config_error(format!("{name} must be a whole number, got '{value}'"))
    })
}
