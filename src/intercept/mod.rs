// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor adapters
//!
//! One adapter per outbound-request pathway. Each normalizes its pathway's
//! parameters into an [`OutboundRequest`](crate::policy::OutboundRequest),
//! gates on the policy evaluator, and on a block suppresses the send and
//! reports it. On allow the captured original primitive is invoked unmodified.

mod beacon;
mod fetch;
mod form;
mod registry;
mod xhr;

use std::sync::Arc;

use crate::policy::{evaluate, ConfigStore, Decision, OutboundRequest, PathwayKind, ReasonCode};
use crate::sink::{HistoryEntry, HistoryLog, Notice, Notifier};

pub use beacon::BeaconInterceptor;
pub use fetch::{FetchInit, FetchInput, FetchInterceptor, FetchRequest};
pub use form::{FormDescription, FormInterceptor, SubmitOutcome};
pub use registry::InterceptorRegistry;
pub use xhr::{XhrInterceptor, XhrRequest};

/// Shared pre-send gate
///
/// Loads config fresh per evaluation and owns the best-effort reporting side
/// effects. Instrumentation failures never escape: a config store error fails
/// open and a notification error is swallowed.
pub(crate) struct Gate {
    config: Arc<dyn ConfigStore>,
    history: HistoryLog,
    notifier: Arc<dyn Notifier>,
}

impl Gate {
    pub(crate) fn new(
        config: Arc<dyn ConfigStore>,
        history: HistoryLog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            history,
            notifier,
        }
    }

    /// Evaluate a request against freshly loaded config
    pub(crate) async fn decide(&self, request: &OutboundRequest) -> Decision {
        match self.config.load().await {
            Ok(config) => evaluate(request, &config),
            Err(e) => {
                tracing::warn!(error = %e, url = %request.url, "config load failed, failing open");
                Decision::allow(ReasonCode::Ok)
            }
        }
    }

    /// Record a blocked attempt: history append plus host notification
    pub(crate) fn report(&self, kind: PathwayKind, request: &OutboundRequest, decision: &Decision) {
        tracing::info!(
            kind = %kind,
            url = %request.url,
            method = %request.method,
            reason = %decision.reason,
            "blocked outbound request"
        );

        self.history.append(HistoryEntry::from_decision(
            kind,
            &request.url,
            &request.method,
            request.initiator.url_str(),
            decision,
        ));

        if let Err(e) = self
            .notifier
            .notify(Notice::blocked(kind, &request.url, &request.method, decision))
        {
            tracing::debug!(error = %e, "blocked notification dropped");
        }
    }

    /// Record a programmatic submit that could not be gated
    pub(crate) fn observe_programmatic(&self, request: &OutboundRequest) {
        if let Err(e) = self.notifier.notify(Notice::ProgrammaticSubmit {
            action: request.url.clone(),
            method: request.method.clone(),
        }) {
            tracing::debug!(error = %e, "programmatic submit notification dropped");
        }
    }
}
