//! Error types for cutforge

use thiserror::Error;

/// Main error type for cutforge operations
#[derive(Debug, Error)]
pub enum CutForgeError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed graph input
    #[error("Graph error: {0}")]
    Graph(String),

    /// The worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for cutforge operations
pub type Result<T> = std::result::Result<T, CutForgeError>;
