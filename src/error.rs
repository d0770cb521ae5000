use std::path::PathBuf;
use thiserror::Error;

use crate::model::NodeId;

/// Core library errors
#[derive(Error, Debug)]
pub enum SprigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tree data '{path}': {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors raised by tree widget operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced node has no entry in the relevant index.
    #[error("Node not found: {0}")]
    NotFound(NodeId),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SprigError>;

/// Result type for widget operations
pub type TreeResult<T> = std::result::Result<T, TreeError>;
