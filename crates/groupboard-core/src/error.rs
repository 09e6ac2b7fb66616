//! Error types for groupboard-core
//!
//! Fetch failures are typed here but absorbed by panels; only the CLI
//! surfaces them to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while retrieving or decoding one metric payload
#[derive(Error, Debug)]
pub enum FetchError {
    // ===================
    // Transport
    // ===================
    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// A coalesced request failed on another caller's behalf
    #[error("Shared request failed: {message}")]
    Shared { message: String },

    #[error("Failed to read fixture {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Payload
    // ===================
    #[error("Unexpected payload shape for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl FetchError {
    /// Short label for status lines and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Status { .. } => "status",
            FetchError::Shared { .. } => "shared",
            FetchError::Io { .. } => "io",
            FetchError::Decode { .. } => "decode",
            FetchError::Shape(_) => "shape",
        }
    }
}

/// Adapted data violates the chart contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Dataset '{dataset}' has {values} values for {labels} labels")]
    LengthMismatch {
        dataset: String,
        labels: usize,
        values: usize,
    },
}

/// Configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}
