use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DailyLogError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported {document} version: {found} (expected {expected})")]
    UnsupportedVersion {
        document: &'static str,
        found: u32,
        expected: u32,
    },

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not writable: {}", .0.display())]
    NotWritable(PathBuf),

    #[error("Failed to parse cache file {}: {source}", path.display())]
    CacheParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DailyLogError>;
