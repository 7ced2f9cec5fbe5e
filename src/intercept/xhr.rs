// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XHR adapter
//!
//! Method and URL are captured at the `open` step, the body arrives at `send`.
//! The open-step metadata is scoped to the request instance, never shared
//! across requests. A block aborts the instance and fails `send` the way a
//! network failure would.

use std::sync::Arc;

use super::Gate;
use crate::error::{Error, Result};
use crate::policy::{Body, OutboundRequest, PageContext, PathwayKind};
use crate::send::{HttpSend, SendReceipt};

/// Adapter for the XHR pathway; hands out per-request instances
pub struct XhrInterceptor {
    gate: Arc<Gate>,
    send: Arc<dyn HttpSend>,
}

impl XhrInterceptor {
    pub(crate) fn new(gate: Arc<Gate>, send: Arc<dyn HttpSend>) -> Self {
        Self { gate, send }
    }

    /// Create a request instance for a page
    pub fn new_request(&self, page: &PageContext) -> XhrRequest {
        XhrRequest {
            gate: self.gate.clone(),
            send: self.send.clone(),
            page: page.clone(),
            meta: None,
            aborted: false,
        }
    }
}

/// Method/URL captured at the open step
#[derive(Debug, Clone)]
struct OpenMeta {
    method: String,
    url: String,
}

/// One in-flight XHR-style request
pub struct XhrRequest {
    gate: Arc<Gate>,
    send: Arc<dyn HttpSend>,
    page: PageContext,
    meta: Option<OpenMeta>,
    aborted: bool,
}

impl XhrRequest {
    /// Capture method and URL for this instance
    pub fn open(&mut self, method: impl AsRef<str>, url: impl Into<String>) {
        self.meta = Some(OpenMeta {
            method: method.as_ref().to_uppercase(),
            url: url.into(),
        });
        self.aborted = false;
    }

    /// Whether the instance has been aborted
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Abort the instance
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    /// Gate and issue the send
    ///
    /// An unopened instance falls back to GET with an empty URL, which
    /// resolves to the page itself; the evaluator sees a same-origin GET.
    pub async fn send(&mut self, body: Body) -> Result<SendReceipt> {
        let (method, url) = match &self.meta {
            Some(meta) => (meta.method.clone(), meta.url.clone()),
            None => ("GET".to_string(), String::new()),
        };

        let request = OutboundRequest::new(url, method, self.page.clone()).body(body);
        let decision = self.gate.decide(&request).await;

        if decision.block {
            self.abort();
            self.gate.report(PathwayKind::Xhr, &request, &decision);
            return Err(Error::blocked(
                PathwayKind::Xhr,
                request.url,
                decision.reason,
            ));
        }

        self.send.send(&request).await
    }
}
