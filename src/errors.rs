//! Error types for each external collaborator.
//!
//! Only [`ConfigError`] is fatal. The others are recovered where they occur:
//! a failed topic contributes no articles, a failed summary falls back to a
//! placeholder, and a failed publish is reported as `false`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required secret {0} is not set")]
    MissingSecret(&'static str),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure of a single news search request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("news API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("news API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("summarization unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("publishing endpoint returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid site URL: {0}")]
    Endpoint(#[from] url::ParseError),
}
