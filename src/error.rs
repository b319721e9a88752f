use thiserror::Error as ThisError;

/// Errors that can occur while configuring loggers or emitting records
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// A handler failed while processing a record.
    #[error("Handler error: {0}")]
    Handler(String),
    /// A JSON configuration document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Timestamp formatting failed.
    #[error("Time format error: {0}")]
    TimeFormat(#[from] time::error::Format),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
