//! Error types for the hostgate server.

use thiserror::Error;

/// Errors that can occur while configuring or running the gate.
#[derive(Error, Debug)]
pub enum SrvError {
    /// HTTP server failed to bind or run.
    #[error("server error: {0}")]
    Server(String),

    /// Configuration is invalid or unreadable.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
