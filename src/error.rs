// src/error.rs
use thiserror::Error;

/// Everything that can go wrong below the CLI.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("sheet error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("login failed: {0}")]
    Login(String),
}

impl ScrapeError {
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status { status, url: url.into() }
    }

    pub fn login(msg: impl Into<String>) -> Self {
        Self::Login(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
