use crate::core::download::{Response, Transport};
use crate::core::proxy::ProxyConfig;
use crate::error::{InstallerError, Result};
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Certificate, Proxy};
use std::time::Duration;
use url::Url;

pub const USER_AGENT: &str = concat!("jfrog-cli-installer/", env!("CARGO_PKG_VERSION"));

/// How the HTTP client reaches the distribution server.
pub struct ClientSetting {
    pub proxy: Option<ProxyConfig>,
    pub timeout: Duration,
    pub root_certificates: Vec<Certificate>,
}

impl ClientSetting {
    pub fn new(timeout: Duration) -> Self {
        Self {
            proxy: None,
            timeout,
            root_certificates: Vec::new(),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Trusts an extra PEM-encoded root on top of the bundled web roots.
    pub fn add_root_certificate_pem(mut self, pem: &[u8]) -> Result<Self> {
        let certificate = Certificate::from_pem(pem).map_err(|e| {
            InstallerError::config_error(format!("invalid root certificate: {e}"))
        })?;
        self.root_certificates.push(certificate);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpTransport> {
        // The Downloader follows (and bounds) redirects itself.
        let mut cb = Client::builder()
            .redirect(Policy::none())
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(USER_AGENT);

        cb = match &self.proxy {
            // https targets go through a CONNECT tunnel; the pool keeps one
            // tunnel per target host and reuses it across same-host hops.
            Some(proxy) => {
                let url = proxy.url();
                cb.proxy(Proxy::https(&url).map_err(|source| InstallerError::ProxyConfig {
                    value: url.clone(),
                    reason: source.to_string(),
                })?)
            }
            // Ambient variables were already consulted by the proxy detector.
            None => cb.no_proxy(),
        };

        for certificate in self.root_certificates {
            cb = cb.add_root_certificate(certificate);
        }

        let client = cb
            .build()
            .map_err(|e| InstallerError::config_error(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpTransport {
            client,
            proxy: self.proxy,
        })
    }
}

/// Issues one GET per call, directly or through the configured proxy.
pub struct HttpTransport {
    client: Client,
    proxy: Option<ProxyConfig>,
}

impl HttpTransport {
    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }
}

impl Transport for HttpTransport {
    fn get(&mut self, url: &Url) -> Result<Response<'_>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| InstallerError::transport(url.as_str(), e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();

        tracing::debug!(%url, status, proxied = self.proxy.is_some(), "response");

        Ok(Response {
            status,
            location,
            content_length,
            body: Box::new(response),
        })
    }
}
