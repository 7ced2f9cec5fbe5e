// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Sendguard - Outbound Request Interception
//!
//! A client-side interception layer that gates a page's network-emitting
//! operations on a small heuristic rule set before anything leaves the wire.
//!
//! ## Features
//!
//! - Policy evaluator: pure, deterministic, fail-open rule engine
//! - Five pathways: form submit, programmatic submit, fetch, XHR, beacon
//! - Allowlist: trusted destination hosts bypass every rule
//! - Capped history of blocked attempts, newest first
//! - Fire-and-forget blocked notifications to the host context
//! - Capability table: original send primitives captured once at install
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sendguard::{
//!     FetchInit, HistoryLog, InterceptorRegistry, MemoryConfigStore, NullNotifier,
//!     PageContext, SendPrimitives,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = InterceptorRegistry::install(
//!         SendPrimitives::capture()?,
//!         Arc::new(MemoryConfigStore::new()),
//!         HistoryLog::new(),
//!         Arc::new(NullNotifier),
//!     );
//!
//!     let page = PageContext::new("https://app.example/dashboard")?;
//!     match registry.fetch().fetch("/api/items", FetchInit::new(), &page).await {
//!         Ok(receipt) => println!("sent, status {}", receipt.status),
//!         Err(e) if e.is_blocked() => println!("suppressed: {}", e),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod intercept;
pub mod policy;
pub mod send;
pub mod sink;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Policy core
pub use policy::{
    evaluate, Body, ConfigStore, Decision, MemoryConfigStore, OutboundRequest, PageContext,
    PathwayKind, PolicyConfig, ReasonCode, WRITE_METHODS,
};

// Interceptors
pub use intercept::{
    BeaconInterceptor, FetchInit, FetchInput, FetchInterceptor, FetchRequest, FormDescription,
    FormInterceptor, InterceptorRegistry, SubmitOutcome, XhrInterceptor, XhrRequest,
};

// Side channels
pub use sink::{
    ChannelNotifier, HistoryEntry, HistoryLog, Notice, Notifier, NullNotifier,
    DEFAULT_HISTORY_CAP,
};

// Send capabilities
pub use send::{BeaconSend, HttpSend, HttpSender, SendPrimitives, SendReceipt, SpawnSend};

/// Sendguard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
