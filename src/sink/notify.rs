// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocked-send notification channel
//!
//! Fire-and-forget: a notifier may fail, and callers are entitled to ignore
//! it. Failure here never affects the decision path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::policy::{Decision, PathwayKind, ReasonCode};

/// Message forwarded to the owning host context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Notice {
    /// A send was suppressed
    Blocked {
        kind: PathwayKind,
        url: String,
        method: String,
        reason: ReasonCode,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    /// A programmatic form submit was observed but could not be gated
    ProgrammaticSubmit { action: String, method: String },
}

impl Notice {
    /// Build a blocked notice from a decision
    pub fn blocked(
        kind: PathwayKind,
        url: impl Into<String>,
        method: impl Into<String>,
        decision: &Decision,
    ) -> Self {
        Notice::Blocked {
            kind,
            url: url.into(),
            method: method.into(),
            reason: decision.reason,
            details: decision.details.clone(),
        }
    }
}

/// Best-effort notification sink
pub trait Notifier: Send + Sync {
    /// Deliver a notice; must never block the caller
    fn notify(&self, notice: Notice) -> Result<()>;
}

/// Notifier that drops everything
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) -> Result<()> {
        Ok(())
    }
}

/// Notifier backed by a bounded channel to the host context
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end for the host context
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) -> Result<()> {
        self.tx
            .try_send(notice)
            .map_err(|e| Error::Notify(e.to_string()))
    }
}
