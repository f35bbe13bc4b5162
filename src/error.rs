use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineTallyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("no file open")]
    NoFileOpen,

    #[error("no workspace open")]
    NoWorkspace,

    #[error("Aggregation service has stopped")]
    ServiceStopped,
}

pub type Result<T> = std::result::Result<T, LineTallyError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
