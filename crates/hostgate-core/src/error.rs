use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors that can occur while classifying a request origin
#[derive(Error, Debug)]
pub enum GateError {
    /// Suffix rule is empty or malformed
    #[error("invalid suffix rule: {0}")]
    InvalidRule(String),

    /// Reverse DNS lookup failed or timed out
    #[error("reverse lookup failed: {0}")]
    Resolve(String),

    /// Match mode name not recognized
    #[error("unknown match mode '{0}', expected labels, exact or substring")]
    UnknownMode(String),
}
