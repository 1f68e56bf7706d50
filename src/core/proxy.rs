use crate::error::{InstallerError, Result};
use std::fmt;
use url::Url;

/// Environment variables consulted for an outbound HTTPS proxy, in order.
pub const PROXY_ENV_VARS: [&str; 2] = ["https_proxy", "HTTPS_PROXY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// `http` or `https`; an `https` proxy is itself reached over TLS.
    pub scheme: String,
    pub hostname: String,
    pub port: u16,
}

impl ProxyConfig {
    pub fn url(&self) -> String {
        format!("{}://{self}", self.scheme)
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}

/// Decides whether traffic must be tunneled. The first non-empty variable
/// wins; a value that does not parse is an error, never a silent fallback to
/// direct mode.
pub fn detect<F>(lookup: F) -> Result<Option<ProxyConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    for name in PROXY_ENV_VARS {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => return parse(value.trim()).map(Some),
            _ => continue,
        }
    }
    Ok(None)
}

pub fn parse(value: &str) -> Result<ProxyConfig> {
    let invalid = |reason: &str| InstallerError::ProxyConfig {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    // `proxy.local:8080` is common in the wild and means plain HTTP.
    let normalized = if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    };

    let url = Url::parse(&normalized).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(&format!("unsupported scheme '{}'", url.scheme())));
    }

    let hostname = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("missing host"))?
        .to_string();

    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    Ok(ProxyConfig {
        scheme: url.scheme().to_string(),
        hostname,
        port,
    })
}
