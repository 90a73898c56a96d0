// ABOUTME: Centralized error handling for the application
// Provides consistent error types and conversions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No saved graph state found at any expected location")]
    StateNotFound,

    #[error("File watching error: {0}")]
    FileWatch(#[from] notify::Error),

    #[error("Channel send error: {0}")]
    ChannelSend(String),
}

impl<T> From<crossbeam_channel::SendError<T>> for ExportError {
    fn from(err: crossbeam_channel::SendError<T>) -> Self {
        ExportError::ChannelSend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
