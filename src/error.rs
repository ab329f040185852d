use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single (domain, source) fetch task.
///
/// None of these escape the orchestrator; they are logged and the task
/// contributes zero URLs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to fetch URLs, status code: {code}")]
    HttpStatus { code: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Timeouts are transport failures
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Problems with the run configuration, all raised before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no domains supplied")]
    NoDomains,

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid source endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("error saving URLs to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
