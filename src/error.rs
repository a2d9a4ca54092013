use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("No node names found in feed")]
    EmptyFeed,

    #[error("Group `{group}` not found in configuration")]
    PatternNotFound { group: String },

    #[error("Region line for `{label}` has {fields} fields, expected at least {expected}")]
    MalformedRegionLine {
        label: String,
        fields: usize,
        expected: usize,
    },

    #[error("Region line for `{label}` not found in configuration")]
    MissingRegionLine { label: String },
}

impl SyncError {
    /// Wrap an I/O error with the path it happened on, promoting `NotFound`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SyncError::FileNotFound { path }
        } else {
            SyncError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
