use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Doxyfill operations
#[derive(Error, Debug)]
pub enum DoxyfillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Invalid insertion: {0}")]
    Mutation(String),
}

pub type Result<T> = std::result::Result<T, DoxyfillError>;
