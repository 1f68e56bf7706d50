use crate::core::platform::ArtifactTag;
use crate::error::{InstallerError, Result};
use std::str::FromStr;
use url::Url;

pub const DEFAULT_RELEASES_URL: &str = "https://releases.jfrog.io/artifactory/jfrog-cli";
pub const PACKAGE_PREFIX: &str = "jfrog-cli";
/// Query parameter the legacy distribution backend selects packages with.
pub const LEGACY_PACKAGE_PARAM: &str = "bt_package";

/// Published product line. Each has its own path on the server and its own
/// executable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    V2,
    V2Jf,
}

impl Flavor {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Flavor::V2 => "v2",
            Flavor::V2Jf => "v2-jf",
        }
    }

    pub fn executable_base(&self) -> &'static str {
        match self {
            Flavor::V2 => "jfrog",
            Flavor::V2Jf => "jf",
        }
    }
}

impl FromStr for Flavor {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "v2" => Ok(Flavor::V2),
            "v2-jf" => Ok(Flavor::V2Jf),
            other => Err(InstallerError::config_error(format!(
                "unknown flavor '{other}' (expected 'v2' or 'v2-jf')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlLayout {
    /// `<root>/<flavor>/<version>/<package>/<exe>`
    PathSegment,
    /// `<root>/<flavor>/<version>/<exe>?bt_package=<package>`
    QueryParameter,
}

impl FromStr for UrlLayout {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "path" => Ok(UrlLayout::PathSegment),
            "query" => Ok(UrlLayout::QueryParameter),
            other => Err(InstallerError::config_error(format!(
                "unknown URL layout '{other}' (expected 'path' or 'query')"
            ))),
        }
    }
}

/// Identifies exactly one remote artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoordinate {
    pub version: String,
    pub tag: ArtifactTag,
}

impl ReleaseCoordinate {
    pub fn package_name(&self) -> String {
        format!("{PACKAGE_PREFIX}-{}", self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub releases_url: String,
    pub flavor: Flavor,
    pub layout: UrlLayout,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            flavor: Flavor::V2Jf,
            layout: UrlLayout::PathSegment,
        }
    }
}

impl Distribution {
    pub fn artifact_url(&self, release: &ReleaseCoordinate, executable_name: &str) -> Result<Url> {
        let package = release.package_name();
        let mut url = parse_releases_url(&self.releases_url)?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                InstallerError::config_error(format!(
                    "releases URL '{}' cannot carry a path",
                    self.releases_url
                ))
            })?;
            segments
                .pop_if_empty()
                .push(self.flavor.path_segment())
                .push(&release.version);
            if self.layout == UrlLayout::PathSegment {
                segments.push(&package);
            }
            segments.push(executable_name);
        }

        if self.layout == UrlLayout::QueryParameter {
            url.query_pairs_mut()
                .append_pair(LEGACY_PACKAGE_PARAM, &package);
        }

        Ok(url)
    }
}

pub fn parse_releases_url(value: &str) -> Result<Url> {
    let url = Url::parse(value.trim()).map_err(|source| InstallerError::InvalidUrl {
        url: value.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(InstallerError::config_error(format!(
            "releases URL '{value}' must use http or https"
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn coordinate(version: &str, tag: ArtifactTag) -> ReleaseCoordinate {
        ReleaseCoordinate {
            version: version.to_string(),
            tag,
        }
    }

    #[test]
    fn test_default_path_layout() {
        let url = Distribution::default()
            .artifact_url(&coordinate("2.52.8", ArtifactTag::LinuxAmd64), "jf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://releases.jfrog.io/artifactory/jfrog-cli/v2-jf/2.52.8/jfrog-cli-linux-amd64/jf"
        );
    }

    #[test]
    fn test_v2_flavor() {
        let distribution = Distribution {
            flavor: Flavor::V2,
            ..Distribution::default()
        };
        let url = distribution
            .artifact_url(&coordinate("2.1.0", ArtifactTag::WindowsAmd64), "jfrog.exe")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://releases.jfrog.io/artifactory/jfrog-cli/v2/2.1.0/jfrog-cli-windows-amd64/jfrog.exe"
        );
    }

    #[test]
    fn test_query_layout() {
        let distribution = Distribution {
            layout: UrlLayout::QueryParameter,
            ..Distribution::default()
        };
        let url = distribution
            .artifact_url(&coordinate("2.52.8", ArtifactTag::MacArm64), "jf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://releases.jfrog.io/artifactory/jfrog-cli/v2-jf/2.52.8/jf?bt_package=jfrog-cli-mac-arm64"
        );
    }

    #[test]
    fn test_trailing_slash_on_root() {
        let distribution = Distribution {
            releases_url: "http://mirror.local/cli/".to_string(),
            ..Distribution::default()
        };
        let url = distribution
            .artifact_url(&coordinate("1.0.0", ArtifactTag::Linux386), "jf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://mirror.local/cli/v2-jf/1.0.0/jfrog-cli-linux-386/jf"
        );
    }

    #[test]
    fn test_version_is_escaped_not_interpreted() {
        let url = Distribution::default()
            .artifact_url(&coordinate("2.0/../x", ArtifactTag::LinuxArm), "jf")
            .unwrap();
        assert!(url.path().contains("2.0%2F..%2Fx"));
    }

    #[test]
    fn test_parse_flavor_and_layout() {
        assert_eq!("v2".parse::<Flavor>().unwrap(), Flavor::V2);
        assert_eq!("v2-jf".parse::<Flavor>().unwrap(), Flavor::V2Jf);
        assert!("v3".parse::<Flavor>().is_err());
        assert_eq!("query".parse::<UrlLayout>().unwrap(), UrlLayout::QueryParameter);
        assert!("segments".parse::<UrlLayout>().is_err());
    }

    #[test]
    fn test_parse_releases_url() {
        assert!(parse_releases_url("ftp://mirror.local").is_err());
        assert!(parse_releases_url("not a url").is_err());
        assert!(parse_releases_url("https://mirror.local/jfrog-cli").is_ok());
    }
}
