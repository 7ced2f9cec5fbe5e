// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Evaluation decisions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Machine-readable reason for a decision
///
/// Always present, including on the allow path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// No rule matched
    Ok,
    /// Destination host is on the allowlist
    Allowlisted,
    /// Destination could not be resolved; evaluation failed open
    InvalidUrl,
    /// Cross-origin write method
    CrossOriginWrite,
    /// Estimated body size over the configured limit
    BodyTooLarge,
    /// Credential-like field name sent cross-origin with a write method
    SuspiciousKeysExternal,
    /// Beacon fast path: cross-origin beacon send
    CrossOriginBeacon,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReasonCode::Ok => "ok",
            ReasonCode::Allowlisted => "allowlisted",
            ReasonCode::InvalidUrl => "invalid_url",
            ReasonCode::CrossOriginWrite => "cross_origin_write",
            ReasonCode::BodyTooLarge => "body_too_large",
            ReasonCode::SuspiciousKeysExternal => "suspicious_keys_external",
            ReasonCode::CrossOriginBeacon => "cross_origin_beacon",
        };
        f.write_str(s)
    }
}

/// Outcome of evaluating one outbound request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the send should be suppressed
    pub block: bool,
    /// Why
    pub reason: ReasonCode,
    /// Optional machine-readable detail (offending origin, byte count, key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Decision {
    /// Allow with a reason
    pub fn allow(reason: ReasonCode) -> Self {
        Self {
            block: false,
            reason,
            details: None,
        }
    }

    /// Block with a reason
    pub fn block(reason: ReasonCode) -> Self {
        Self {
            block: true,
            reason,
            details: None,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
