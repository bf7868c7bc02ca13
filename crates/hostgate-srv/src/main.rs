//! hostgate - reverse-DNS origin gate.
//!
//! Answers `GET /` with 200 when the caller's address reverse-resolves to a
//! trusted domain, 403 otherwise.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    hostgate_srv::run().await
}
