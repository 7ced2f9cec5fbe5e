// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form submission adapters
//!
//! Declarative submission (a submit event) can await evaluation before the
//! send happens, so it gets the full policy and a user-facing warning on
//! block. Programmatic submission is a synchronous API call with no pre-send
//! gap; it is observed and notified but never suppressed.

use std::sync::Arc;

use super::Gate;
use crate::error::Result;
use crate::policy::{Body, Decision, OutboundRequest, PageContext, PathwayKind};
use crate::send::{HttpSend, SendReceipt, SpawnSend};

/// Normalized description of a form about to submit
#[derive(Debug, Clone, Default)]
pub struct FormDescription {
    /// `action` attribute; defaults to the current page URL
    pub action: Option<String>,
    /// `method` attribute; defaults to GET
    pub method: Option<String>,
    /// Field entries in document order
    pub fields: Vec<(String, String)>,
}

impl FormDescription {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Add a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// Outcome of a gated declarative submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The submission went through
    Sent(SendReceipt),
    /// The submission was suppressed
    Blocked {
        /// The evaluator's decision
        decision: Decision,
        /// Synchronous user-facing message naming reason and destination
        warning: String,
    },
}

impl SubmitOutcome {
    /// Whether the submission was suppressed
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitOutcome::Blocked { .. })
    }
}

/// Adapter for both form submission pathways
pub struct FormInterceptor {
    gate: Arc<Gate>,
    send: Arc<dyn HttpSend>,
    call: Arc<dyn SpawnSend>,
}

impl FormInterceptor {
    pub(crate) fn new(gate: Arc<Gate>, send: Arc<dyn HttpSend>, call: Arc<dyn SpawnSend>) -> Self {
        Self { gate, send, call }
    }

    fn normalize(&self, form: &FormDescription, page: &PageContext) -> OutboundRequest {
        let action = form
            .action
            .clone()
            .unwrap_or_else(|| page.url_str().to_string());
        let method = form.method.as_deref().unwrap_or("GET");
        OutboundRequest::new(action, method, page.clone()).body(Body::Form(form.fields.clone()))
    }

    /// Gate a user-triggered (event) submission
    ///
    /// On block, the default action is suppressed and the outcome carries a
    /// warning for immediate display. Errors from the underlying send are the
    /// pathway's normal failure surface and propagate as-is.
    pub async fn submit(&self, form: &FormDescription, page: &PageContext) -> Result<SubmitOutcome> {
        let request = self.normalize(form, page);
        let decision = self.gate.decide(&request).await;

        if decision.block {
            self.gate
                .report(PathwayKind::FormSubmit, &request, &decision);
            let warning = format!(
                "Submission blocked\nreason: {}\ndestination: {}",
                decision.reason, request.url
            );
            return Ok(SubmitOutcome::Blocked { decision, warning });
        }

        let receipt = self.send.send(&request).await?;
        Ok(SubmitOutcome::Sent(receipt))
    }

    /// Observe a programmatic `submit()` call
    ///
    /// The trigger is synchronous and cannot cleanly be suppressed without
    /// changing page behavior, so this path only notifies and then lets the
    /// original call complete. Known limitation, not a bug.
    pub fn submit_call(&self, form: &FormDescription, page: &PageContext) {
        let request = self.normalize(form, page);
        self.gate.observe_programmatic(&request);
        self.call.send(request);
    }
}
