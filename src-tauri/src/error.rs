use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing a day file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[from] csv::Error),
    #[error("failed to move {path} aside: {source}")]
    SetAside {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} could not be loaded; refusing to overwrite it")]
    Unreadable { path: PathBuf },
}

/// Failures reading or persisting the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path}: expected a JSON object")]
    NotAnObject { path: PathBuf },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no home directory available for the config file")]
    NoHomeDir,
}

/// Rejected record list edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown field `{0}`")]
    UnknownField(String),
}
