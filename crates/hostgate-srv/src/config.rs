//! Server configuration for the hostgate gate.
//!
//! Read once at process start; the gate never re-reads configuration at
//! runtime. Decision logic receives the compiled rule by value and never
//! consults ambient state.

use hostgate_core::{MatchMode, SuffixRule};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for a hostgate instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address (default: 0.0.0.0:5001).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Allowed-suffix rule for resolved origin names.
    #[serde(default)]
    pub rule: RuleConfig,

    /// Upper bound on one reverse lookup, in seconds.
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_secs: u64,
}

/// The trusted-origin rule as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Domain whose hosts are trusted (default: ant.example.corp).
    #[serde(default = "default_domain")]
    pub domain: String,

    /// How resolved names are tested against the domain (default: labels).
    #[serde(default)]
    pub mode: MatchMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            rule: RuleConfig::default(),
            resolve_timeout_secs: default_resolve_timeout(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            mode: MatchMode::default(),
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::SrvError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration and compile the suffix rule.
    ///
    /// Called once at startup; any error here must abort the process rather
    /// than let a misconfigured gate answer traffic.
    pub fn validate(&self) -> crate::Result<SuffixRule> {
        if self.resolve_timeout_secs == 0 {
            return Err(crate::SrvError::Config(
                "resolve_timeout_secs must be at least 1".to_string(),
            ));
        }

        SuffixRule::new(&self.rule.domain, self.rule.mode)
            .map_err(|e| crate::SrvError::Config(e.to_string()))
    }

    /// The reverse-lookup deadline as a [`Duration`].
    #[must_use]
    pub const fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

// Default value functions for serde.
fn default_listen() -> SocketAddr {
    "0.0.0.0:5001".parse().expect("valid default addr")
}

fn default_domain() -> String {
    String::from("ant.example.corp")
}

const fn default_resolve_timeout() -> u64 {
    2
}
