//! Core types for the hostgate origin classifier.
//!
//! This crate holds the decision logic and nothing else:
//!
//! - **Rules**: [`SuffixRule`] and [`MatchMode`], the allowed-suffix policy
//! - **Decisions**: [`Classifier`], [`Classification`] and [`Outcome`]
//! - **Seam**: the [`ReverseResolver`] trait, so decisions are testable
//!   without DNS infrastructure
//! - **Errors**: [`GateError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use hostgate_core::{Classifier, MatchMode, SuffixRule};
//!
//! let rule = SuffixRule::new("ant.example.corp", MatchMode::Labels)?;
//! let classifier = Classifier::new(rule, resolver);
//! let decision = classifier.classify("10.1.2.3".parse()?).await;
//! println!("{} -> {}", decision.resolved, decision.outcome);
//! ```

mod classify;
mod error;
mod rule;

pub use classify::{Classification, Classifier, Outcome, ReverseResolver};
pub use error::{GateError, Result};
pub use rule::{MatchMode, SuffixRule};
