use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while resolving a setting against an already loaded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the analyzer \"{0}\" does not exist")]
    UnknownAnalyzer(String),
    #[error("the analyzer \"{0}\" has no per-file configuration; use `global_config` instead")]
    NoPerFileConfig(String),
    #[error("there is no config at path \"{path}\"; walked path: \"{walked}\"")]
    MissingConfigPath { path: String, walked: String },
    #[error("the file \"{0}\" does not exist")]
    UnknownFile(String),
    #[error("config at path \"{path}\" has an unexpected shape: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures raised while building a [`crate::ProjectConfig`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    #[error("failed to parse configuration: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("configuration root must be a mapping of analyzer names")]
    NotATree,
    #[error("invalid glob pattern {0}: {1}")]
    Glob(String, #[source] globset::Error),
    #[error("invalid configuration for analyzer \"{analyzer}\": {reason}")]
    InvalidAnalyzer { analyzer: String, reason: String },
}
