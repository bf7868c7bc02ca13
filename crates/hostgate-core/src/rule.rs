//! Allowed-suffix rules: which resolved names count as trusted origins.
//!
//! A rule pairs a domain with a [`MatchMode`]. Matching is case-insensitive
//! and ignores the trailing root dot that PTR answers carry
//! (`host.example.corp.`).

use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a resolved name is tested against the configured domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Anchored, label-boundary comparison of trailing labels.
    ///
    /// `ant.example.corp` and `host.ant.example.corp` both match a rule of
    /// `ant.example.corp`; `evilant.example.corp.attacker.net` does not.
    #[default]
    Labels,

    /// Name must equal the domain exactly; subdomains are rejected.
    Exact,

    /// Domain may appear anywhere in the name. Permissive: a name under an
    /// attacker-controlled zone can embed the domain in the middle. Kept
    /// for deployments that relied on it; prefer `labels`.
    Substring,
}

impl MatchMode {
    /// Configuration-facing name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::Exact => "exact",
            Self::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "labels" => Ok(Self::Labels),
            "exact" => Ok(Self::Exact),
            "substring" => Ok(Self::Substring),
            other => Err(GateError::UnknownMode(other.to_string())),
        }
    }
}

/// A validated allowed-suffix rule.
///
/// Construction normalizes the domain (lowercase, trailing dot stripped) and
/// rejects rules that could never match a real name, so a misconfigured gate
/// fails at startup rather than silently denying all traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixRule {
    domain: String,
    mode: MatchMode,
}

impl SuffixRule {
    /// Build a rule from a domain and match mode.
    pub fn new(domain: &str, mode: MatchMode) -> Result<Self> {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();

        if domain.is_empty() {
            return Err(GateError::InvalidRule("domain is empty".to_string()));
        }
        if domain.chars().any(char::is_whitespace) {
            return Err(GateError::InvalidRule(format!(
                "domain '{domain}' contains whitespace"
            )));
        }
        if domain.split('.').any(str::is_empty) {
            return Err(GateError::InvalidRule(format!(
                "domain '{domain}' has an empty label"
            )));
        }

        Ok(Self { domain, mode })
    }

    /// The normalized domain this rule trusts.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The match mode in effect.
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Test a resolved name against the rule.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim_end_matches('.').to_ascii_lowercase();

        match self.mode {
            MatchMode::Substring => name.contains(&self.domain),
            MatchMode::Exact => name == self.domain,
            MatchMode::Labels => {
                let rule: Vec<&str> = self.domain.split('.').collect();
                let labels: Vec<&str> = name.split('.').collect();
                labels.len() >= rule.len() && labels[labels.len() - rule.len()..] == rule[..]
            }
        }
    }
}

impl fmt::Display for SuffixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.domain, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(mode: MatchMode) -> SuffixRule {
        SuffixRule::new("ant.example.corp", mode).unwrap()
    }

    #[test]
    fn test_labels_accepts_domain_and_subdomains() {
        let rule = rule(MatchMode::Labels);
        assert!(rule.matches("ant.example.corp"));
        assert!(rule.matches("worker01.ant.example.corp"));
        assert!(rule.matches("a.b.ant.example.corp"));
    }

    #[test]
    fn test_labels_rejects_label_straddling_names() {
        let rule = rule(MatchMode::Labels);
        // The domain appears, but not on a label boundary or not anchored.
        assert!(!rule.matches("xant.example.corp"));
        assert!(!rule.matches("evilant.example.corp.attacker.net"));
        assert!(!rule.matches("ant.example.corp.attacker.net"));
    }

    #[test]
    fn test_exact_rejects_subdomains() {
        let rule = rule(MatchMode::Exact);
        assert!(rule.matches("ant.example.corp"));
        assert!(!rule.matches("worker01.ant.example.corp"));
    }

    #[test]
    fn test_substring_accepts_subdomains() {
        let rule = rule(MatchMode::Substring);
        assert!(rule.matches("worker01.ant.example.corp"));
    }

    #[test]
    fn test_substring_weakness_is_pinned() {
        // Regression guard: the permissive mode accepts names that merely
        // embed the domain under an untrusted zone. Anyone changing this
        // behavior is changing the compatibility mode, not fixing a bug.
        let rule = rule(MatchMode::Substring);
        assert!(rule.matches("evilant.example.corp.attacker.net"));

        let strict = SuffixRule::new("ant.example.corp", MatchMode::Labels).unwrap();
        assert!(!strict.matches("evilant.example.corp.attacker.net"));
    }

    #[test]
    fn test_unrelated_names_denied_in_every_mode() {
        for mode in [MatchMode::Labels, MatchMode::Exact, MatchMode::Substring] {
            assert!(!rule(mode).matches("mail.google.com"), "mode {mode}");
            assert!(!rule(mode).matches("203.0.113.7"), "mode {mode}");
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rule = SuffixRule::new("ANT.Example.CORP", MatchMode::Labels).unwrap();
        assert_eq!(rule.domain(), "ant.example.corp");
        assert!(rule.matches("Worker01.Ant.EXAMPLE.corp"));
    }

    #[test]
    fn test_trailing_root_dot_ignored() {
        let rule = rule(MatchMode::Labels);
        assert!(rule.matches("worker01.ant.example.corp."));

        let exact = SuffixRule::new("ant.example.corp.", MatchMode::Exact).unwrap();
        assert!(exact.matches("ant.example.corp."));
    }

    #[test]
    fn test_invalid_domains_rejected() {
        assert!(SuffixRule::new("", MatchMode::Labels).is_err());
        assert!(SuffixRule::new("   ", MatchMode::Labels).is_err());
        assert!(SuffixRule::new("ant..corp", MatchMode::Labels).is_err());
        assert!(SuffixRule::new(".ant.example.corp", MatchMode::Labels).is_err());
        assert!(SuffixRule::new("ant example.corp", MatchMode::Labels).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("labels".parse::<MatchMode>().unwrap(), MatchMode::Labels);
        assert_eq!("Exact".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert_eq!(
            "substring".parse::<MatchMode>().unwrap(),
            MatchMode::Substring
        );
        assert!("regex".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_default_mode_is_labels() {
        assert_eq!(MatchMode::default(), MatchMode::Labels);
    }
}
