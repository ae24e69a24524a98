use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single catalog request. This is the only error kind the
/// controllers see; each one turns it into a visible, local UI state.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl NetworkError {
    pub fn url(&self) -> &str {
        match self {
            NetworkError::Transport { url, .. }
            | NetworkError::Status { url, .. }
            | NetworkError::Decode { url, .. } => url,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that stop the dashboard binary before the event loop starts.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Failed to read config file '{path}': {source}", path = path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
