//! # hostgate-srv
//!
//! The runnable reverse-DNS origin gate:
//!
//! - **HTTP surface**: one route, `GET /`, answering `200 Access granted`
//!   or `403` with the rejected origin named
//! - **Resolver**: system reverse DNS behind an enforced deadline
//! - **Config**: TOML file plus CLI/env overrides, read once at startup
//! - **CLI**: `hostgate serve` and `hostgate check <address>`

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod server;

// Re-exports for convenience.
pub use cli::run;
pub use config::ServerConfig;
pub use error::SrvError;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, SrvError>;
