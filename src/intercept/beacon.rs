// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Beacon adapter
//!
//! The beacon primitive decides synchronously, so only the synchronously
//! computable subset of the policy applies: the cross-origin check. Config is
//! not consulted on this path (the store is async), which also means the
//! allowlist does not apply here. Known limitation carried over from the
//! pathway's constraints.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;

use super::Gate;
use crate::policy::{Decision, OutboundRequest, PageContext, PathwayKind, ReasonCode};
use crate::send::BeaconSend;

/// Adapter for the beacon pathway
pub struct BeaconInterceptor {
    gate: Arc<Gate>,
    send: Arc<dyn BeaconSend>,
}

impl BeaconInterceptor {
    pub(crate) fn new(gate: Arc<Gate>, send: Arc<dyn BeaconSend>) -> Self {
        Self { gate, send }
    }

    /// Gate a fire-and-forget send; returns whether the payload was queued
    ///
    /// Blocked sends return `false`, the pathway's native "not queued"
    /// signal. Body contents are not inspected on this path.
    pub fn send(&self, url: &str, data: Option<Bytes>, page: &PageContext) -> bool {
        let Some(resolved) = page.resolve(url) else {
            // Nothing sendable; report the native failure signal
            tracing::debug!(url = %url, "beacon destination did not resolve");
            return false;
        };

        if resolved.origin() != page.origin() {
            let request = OutboundRequest::new(url, "POST", page.clone());
            let decision = Decision::block(ReasonCode::CrossOriginBeacon)
                .with_details(json!({ "origin": resolved.origin().ascii_serialization() }));
            self.gate.report(PathwayKind::Beacon, &request, &decision);
            return false;
        }

        self.send.send(&resolved, data)
    }
}
