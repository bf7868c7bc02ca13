//! The origin classifier: loopback short-circuit, reverse resolution,
//! suffix-rule match.

use crate::error::Result;
use crate::rule::SuffixRule;
use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use tracing::debug;

/// Authorization outcome for one request origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Origin is trusted; let the request through.
    Allowed,
    /// Origin is not trusted.
    Denied,
}

impl Outcome {
    /// Whether this outcome grants access.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Log-friendly label for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reverse DNS seam: maps an address back to a domain name.
///
/// The production implementation lives in the server crate; tests substitute
/// an in-memory fake so decisions stay checkable without DNS infrastructure.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Resolve `ip` to a fully-qualified domain name.
    async fn reverse(&self, ip: IpAddr) -> Result<String>;
}

/// One classification decision.
///
/// Computed fresh per request; the classifier keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Source address the decision was made for.
    pub source: String,
    /// Name the source resolved to, or the literal address when resolution
    /// failed or was never attempted.
    pub resolved: String,
    /// The decision.
    pub outcome: Outcome,
}

/// Classifies request origins against an allowed-suffix rule.
///
/// Stateless across requests: the rule is read-only and the resolver is the
/// only I/O, so one classifier can serve any number of concurrent requests.
pub struct Classifier<R> {
    rule: SuffixRule,
    resolver: R,
}

impl<R: ReverseResolver> Classifier<R> {
    /// Build a classifier from a validated rule and a resolver.
    pub const fn new(rule: SuffixRule, resolver: R) -> Self {
        Self { rule, resolver }
    }

    /// The rule this classifier enforces.
    #[must_use]
    pub const fn rule(&self) -> &SuffixRule {
        &self.rule
    }

    /// Classify a source address.
    ///
    /// Never fails: loopback is allowed without a lookup, and a failed
    /// reverse lookup falls back to matching the literal address, which
    /// denies in practice.
    pub async fn classify(&self, source: IpAddr) -> Classification {
        if source.is_loopback() {
            return Classification {
                source: source.to_string(),
                resolved: source.to_string(),
                outcome: Outcome::Allowed,
            };
        }

        let resolved = match self.resolver.reverse(source).await {
            Ok(name) => name,
            Err(err) => {
                debug!(source = %source, error = %err, "reverse lookup failed, matching literal address");
                source.to_string()
            }
        };

        let outcome = if self.rule.matches(&resolved) {
            Outcome::Allowed
        } else {
            Outcome::Denied
        };

        Classification {
            source: source.to_string(),
            resolved,
            outcome,
        }
    }

    /// Classify a textual source address.
    ///
    /// A malformed address is denied outright; no lookup is attempted.
    pub async fn classify_str(&self, source: &str) -> Classification {
        match source.parse::<IpAddr>() {
            Ok(ip) => self.classify(ip).await,
            Err(_) => Classification {
                source: source.to_string(),
                resolved: source.to_string(),
                outcome: Outcome::Denied,
            },
        }
    }
}
