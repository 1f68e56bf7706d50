use crate::core::client::ClientSetting;
use crate::core::config::Config;
use crate::core::download::{Downloader, Transport};
use crate::core::materialize::materialize;
use crate::error::Result;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub destination: PathBuf,
    pub url: Url,
    pub redirects: usize,
    pub bytes: u64,
}

/// Downloads the configured release and writes it to `bin/`, tunneling
/// through the proxy when one is configured.
pub fn install(config: &Config) -> Result<InstallReport> {
    if let Some(proxy) = &config.proxy {
        println!("🔒 Tunneling through proxy {}", proxy.url());
    }

    let transport = ClientSetting::new(config.timeout)
        .with_proxy(config.proxy.clone())
        .build()?;
    install_with(config, transport)
}

pub fn install_with<T: Transport>(config: &Config, transport: T) -> Result<InstallReport> {
    let url = config.artifact_url()?;
    let destination = config.get_executable_path();

    println!(
        "Downloading JFrog CLI {} ({})",
        config.version, config.target.tag
    );
    tracing::debug!(%url, destination = %destination.display(), "starting install");

    let mut downloader = Downloader::new(transport).with_max_redirects(config.max_redirects);
    let report = downloader.download(&url, |body| {
        materialize(body, &destination, &config.target.os)
    })?;

    println!(
        "✅ JFrog CLI {} installed at {}",
        config.version,
        destination.display()
    );

    Ok(InstallReport {
        destination,
        url: report.final_url,
        redirects: report.redirects,
        bytes: report.bytes,
    })
}
