// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Send capabilities
//!
//! References to the unmodified send primitives, captured once at install
//! time. Interceptors receive these through the registry and never reach for
//! ambient globals.

mod primitives;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::Result;
use crate::policy::OutboundRequest;

pub use primitives::HttpSender;

/// Receipt for a completed send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReceipt {
    /// HTTP status returned by the destination
    pub status: u16,
}

/// An awaitable send primitive (fetch, XHR, declarative form submit)
#[async_trait]
pub trait HttpSend: Send + Sync {
    /// Issue the request and wait for the response status
    async fn send(&self, request: &OutboundRequest) -> Result<SendReceipt>;
}

/// A fire-and-forget send primitive that must complete synchronously from the
/// caller's point of view (programmatic form submit)
pub trait SpawnSend: Send + Sync {
    /// Dispatch the request without waiting for it
    fn send(&self, request: OutboundRequest);
}

/// The beacon primitive: synchronous, returns whether the payload was queued
pub trait BeaconSend: Send + Sync {
    /// Queue the payload for transmission
    fn send(&self, url: &Url, data: Option<Bytes>) -> bool;
}

/// Capability table holding the original send primitives
///
/// Built once at startup and handed to the interceptor registry. Adapters call
/// through these on the allow path.
#[derive(Clone)]
pub struct SendPrimitives {
    /// Fetch pathway
    pub fetch: Arc<dyn HttpSend>,
    /// XHR pathway
    pub xhr: Arc<dyn HttpSend>,
    /// Declarative form submission
    pub form: Arc<dyn HttpSend>,
    /// Programmatic form submission
    pub form_call: Arc<dyn SpawnSend>,
    /// Beacon pathway
    pub beacon: Arc<dyn BeaconSend>,
}

impl SendPrimitives {
    /// Capture the default reqwest-backed primitives
    pub fn capture() -> Result<Self> {
        let sender = Arc::new(HttpSender::new()?);
        Ok(Self {
            fetch: sender.clone(),
            xhr: sender.clone(),
            form: sender.clone(),
            form_call: sender.clone(),
            beacon: sender,
        })
    }

    /// Build a table from a single shared primitive implementing every seam
    pub fn from_shared<S>(sender: Arc<S>) -> Self
    where
        S: HttpSend + SpawnSend + BeaconSend + 'static,
    {
        Self {
            fetch: sender.clone(),
            xhr: sender.clone(),
            form: sender.clone(),
            form_call: sender.clone(),
            beacon: sender,
        }
    }
}
