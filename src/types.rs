//! Core types and errors for the admin panel scanner.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during discovery.
#[derive(Error, Debug)]
pub enum AdfindError {
    #[error("unknown category: {category}")]
    UnknownCategory { category: String },

    #[error("cannot open wordlist {path}: {source}")]
    WordlistUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid target URL: {0}")]
    InvalidTarget(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, AdfindError>;

/// Outcome of a single existence probe against one candidate URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The resource answered in the success/redirect range.
    Reachable { status: u16 },
    /// The resource answered with a client/server error status.
    Unreachable { status: u16 },
    /// The probe never produced a status (DNS, timeout, refused connection).
    TransportError { error: String },
}

impl ProbeOutcome {
    /// Classify an HTTP status: 200 or anything below 400 counts as found.
    pub fn from_status(status: u16) -> Self {
        if status == 200 || status < 400 {
            ProbeOutcome::Reachable { status }
        } else {
            ProbeOutcome::Unreachable { status }
        }
    }
}

/// A candidate URL confirmed reachable, with the status that confirmed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub url: String,
    pub status: u16,
}

/// Result of a single enumeration pass over one wordlist.
#[derive(Debug, Clone, Default)]
pub struct PassResult {
    /// Findings in wordlist order.
    pub found: Vec<Finding>,
    /// Set when the operator's stop-on-find verdict ended the pass.
    pub halted: bool,
    /// Set when a mid-stream read error cut the pass short. Findings
    /// accumulated before the error are kept.
    pub read_error: Option<String>,
}

/// Complete discovery result for a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Target base URL after normalization.
    pub target: String,
    /// Union of findings across all passes.
    pub found: Vec<Finding>,
    /// Number of enumeration passes that ran to completion.
    pub passes_completed: usize,
    /// Non-fatal errors (skipped categories, truncated reads).
    pub errors: Vec<String>,
    /// True when the stop-on-find policy terminated the run.
    pub halted: bool,
    /// Run duration in seconds.
    pub duration_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_reachable() {
        assert_eq!(
            ProbeOutcome::from_status(200),
            ProbeOutcome::Reachable { status: 200 }
        );
        assert_eq!(
            ProbeOutcome::from_status(204),
            ProbeOutcome::Reachable { status: 204 }
        );
    }

    #[test]
    fn redirect_statuses_are_reachable() {
        assert_eq!(
            ProbeOutcome::from_status(301),
            ProbeOutcome::Reachable { status: 301 }
        );
        assert_eq!(
            ProbeOutcome::from_status(399),
            ProbeOutcome::Reachable { status: 399 }
        );
    }

    #[test]
    fn error_statuses_are_unreachable() {
        assert_eq!(
            ProbeOutcome::from_status(400),
            ProbeOutcome::Unreachable { status: 400 }
        );
        assert_eq!(
            ProbeOutcome::from_status(404),
            ProbeOutcome::Unreachable { status: 404 }
        );
        assert_eq!(
            ProbeOutcome::from_status(503),
            ProbeOutcome::Unreachable { status: 503 }
        );
    }
}
