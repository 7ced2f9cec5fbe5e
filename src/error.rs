// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for sendguard
//!
//! Blocked sends surface as errors so that fetch/XHR callers see an ordinary
//! failed network call carrying the block reason.

use thiserror::Error;

use crate::policy::{PathwayKind, ReasonCode};

/// Result type alias for sendguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sendguard
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP send failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request suppressed by the policy evaluator
    #[error("Blocked {kind} to {url}: {reason}")]
    Blocked {
        kind: PathwayKind,
        url: String,
        reason: ReasonCode,
    },

    /// Configuration load/store error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification channel error
    #[error("Notification error: {0}")]
    Notify(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a blocked-send error for a pathway
    pub fn blocked(kind: PathwayKind, url: impl Into<String>, reason: ReasonCode) -> Self {
        Error::Blocked {
            kind,
            url: url.into(),
            reason,
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error represents a policy block
    pub fn is_blocked(&self) -> bool {
        matches!(self, Error::Blocked { .. })
    }

    /// Get the block reason if this is a blocked-send error
    pub fn block_reason(&self) -> Option<ReasonCode> {
        match self {
            Error::Blocked { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_error() {
        let err = Error::blocked(
            PathwayKind::Fetch,
            "https://evil.example/collect",
            ReasonCode::CrossOriginWrite,
        );

        assert!(err.is_blocked());
        assert_eq!(err.block_reason(), Some(ReasonCode::CrossOriginWrite));
        assert!(err.to_string().contains("cross_origin_write"));
    }

    #[test]
    fn test_other_error() {
        let err: Error = "something failed".into();
        assert!(!err.is_blocked());
        assert_eq!(err.block_reason(), None);
    }
}
