use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InstallerError>;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("{message}")]
    Precondition { message: String },

    #[error("Invalid proxy configuration '{value}': {reason}")]
    ProxyConfig { value: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unexpected status code {status} during JFrog CLI download from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Redirect response {status} from {url} has no Location header")]
    MissingLocation { status: u16, url: String },

    #[error("Gave up after {max} redirects, last location was {url}")]
    TooManyRedirects { max: usize, url: String },

    #[error("Transport error while fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Download stream failed: {source}")]
    Stream {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallerError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        InstallerError::Config {
            message: message.into(),
        }
    }

    pub fn transport<E>(url: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        InstallerError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub fn filesystem(path: &std::path::Path, source: std::io::Error) -> Self {
        InstallerError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
