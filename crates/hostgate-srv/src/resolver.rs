//! System reverse DNS with an enforced deadline.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use hostgate_core::{GateError, ReverseResolver};
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

/// Reverse resolver backed by hickory.
///
/// One instance is built at startup and shared by all requests. Lookups are
/// bounded twice: the resolver's own per-query timeout, and an outer
/// deadline so a wedged lookup can never hold a request slot longer than
/// configured.
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl SystemResolver {
    /// Create a resolver that gives up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        // A failed lookup is conclusive for the request; retries only
        // stretch the latency of the inevitable denial.
        opts.attempts = 1;

        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
        Self { resolver, timeout }
    }
}

#[async_trait]
impl ReverseResolver for SystemResolver {
    async fn reverse(&self, ip: IpAddr) -> hostgate_core::Result<String> {
        let response = with_deadline(self.timeout, ip, async {
            self.resolver
                .reverse_lookup(ip)
                .await
                .map_err(|e| GateError::Resolve(e.to_string()))
        })
        .await?;

        response
            .iter()
            .next()
            .map(ToString::to_string)
            .ok_or_else(|| GateError::Resolve(format!("no PTR record for {ip}")))
    }
}

/// Apply the lookup deadline, mapping expiry onto a resolve error.
async fn with_deadline<T>(
    limit: Duration,
    ip: IpAddr,
    lookup: impl Future<Output = hostgate_core::Result<T>> + Send,
) -> hostgate_core::Result<T> {
    tokio::time::timeout(limit, lookup)
        .await
        .map_err(|_| GateError::Resolve(format!("reverse lookup for {ip} timed out after {limit:?}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_converts_slowness_to_resolve_error() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(String::from("never.example.corp"))
        };

        let err = with_deadline(Duration::from_secs(2), "203.0.113.7".parse().unwrap(), slow)
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::Resolve(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_passes_fast_results_through() {
        let fast = async { Ok(String::from("worker01.ant.example.corp")) };

        let name = with_deadline(Duration::from_secs(2), "10.1.2.3".parse().unwrap(), fast)
            .await
            .unwrap();
        assert_eq!(name, "worker01.ant.example.corp");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_passes_lookup_errors_through() {
        let failing = async {
            Err::<String, _>(GateError::Resolve(String::from("NXDOMAIN")))
        };

        let err = with_deadline(Duration::from_secs(2), "10.1.2.3".parse().unwrap(), failing)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("NXDOMAIN"));
    }
}
