//! Failure policy definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a page download failure affects the rest of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log failed pages and keep downloading the others (default).
    #[default]
    BestEffort,
    /// Stop the episode at the first failed page.
    FailFast,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::BestEffort => write!(f, "best-effort"),
            FailurePolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "best-effort" => Ok(FailurePolicy::BestEffort),
            "fail-fast" => Ok(FailurePolicy::FailFast),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}
