//! Error types for channel setup and rotation.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the logging facility.
#[derive(Debug, Error)]
pub enum LogError {
    /// A level name outside the five recognized names was requested.
    /// The previous threshold is left unchanged.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// A log file could not be opened or created at setup time. The
    /// channel is unusable without a destination, so callers should treat
    /// this as fatal for the affected channel.
    #[error("failed to open log file {path}: {source}")]
    ChannelOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the live file aside during rotation failed. Recovered:
    /// the channel keeps writing to the original path, which may still
    /// hold pre-rotation content.
    #[error("failed to rotate {path}: {source}")]
    RotationRename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
