use crate::index::integrity::IntegrityReport;
use std::path::PathBuf;
use thiserror::Error;

/// seo-atlas error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to load {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    #[error("Data integrity violation: {0}")]
    Integrity(IntegrityReport),

    #[error("No page for slug: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for seo-atlas operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a data load error
    pub fn data_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::DataLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for a slug
    pub fn not_found(slug: impl Into<String>) -> Self {
        Error::NotFound(slug.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True when the error is a routing miss rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
