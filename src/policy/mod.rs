// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy evaluation core
//!
//! A pure rule engine over normalized outbound requests. Interceptors feed it;
//! it never performs IO and never blocks on anything but its inputs.

mod config;
mod decision;
mod evaluator;
mod request;

pub use config::{ConfigStore, MemoryConfigStore, PolicyConfig};
pub use decision::{Decision, ReasonCode};
pub use evaluator::{estimate_bytes, evaluate, extract_keys};
pub use request::{Body, OutboundRequest, PageContext, PathwayKind, WRITE_METHODS};
