//! Error types for the logging facility

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Foreground color name not present in the color registry
    #[error("unknown foreground color '{0}'")]
    UnknownForeground(String),

    /// Background color name not present in the color registry
    #[error("unknown background color '{0}'")]
    UnknownBackground(String),

    /// Text that does not decode to any log level
    #[error("unknown log level {0}")]
    UnknownLevel(String),

    /// Log levels decode from strings only
    #[error("can't unmarshal log level from a number")]
    LevelFromNumber,

    /// The detached emission worker has shut down
    #[error("emission worker disconnected")]
    WorkerGone,

    /// IO error from a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
