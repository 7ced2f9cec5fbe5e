// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy configuration and the config store seam
//!
//! Config is loaded fresh for every evaluation; the evaluator never caches it.
//! Per-field serde defaults give merge-with-defaults semantics when a partial
//! config is loaded from a persisted form.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Per-field defaults, shared between Default and serde
fn default_block_cross_origin_writes() -> bool {
    true
}

fn default_suspicious_field_names() -> Vec<String> {
    [
        "password", "passwd", "pwd", "token", "auth", "session", "cookie", "credit", "card",
        "cvv",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_max_body_bytes() -> u64 {
    200_000
}

/// Policy configuration
///
/// `suspicious_field_names` is an ordered list: rule 5 reports the first
/// matching name in list order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Block cross-origin POST/PUT/PATCH/DELETE
    #[serde(default = "default_block_cross_origin_writes")]
    pub block_cross_origin_writes: bool,
    /// Field names that mark a body as carrying credential-like data
    #[serde(default = "default_suspicious_field_names")]
    pub suspicious_field_names: Vec<String>,
    /// Maximum estimated body size before a send is considered suspicious
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
    /// Destination hosts exempt from all rules (case-insensitive exact match)
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            block_cross_origin_writes: default_block_cross_origin_writes(),
            suspicious_field_names: default_suspicious_field_names(),
            max_body_bytes: default_max_body_bytes(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed host (builder style)
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.push(host.into());
        self
    }

    /// Set the maximum body size
    pub fn max_body_bytes(mut self, bytes: u64) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Enable/disable cross-origin write blocking
    pub fn block_cross_origin_writes(mut self, block: bool) -> Self {
        self.block_cross_origin_writes = block;
        self
    }

    /// Whether a destination host is allowlisted
    pub fn is_host_allowed(&self, host: &str) -> bool {
        self.allowed_hosts
            .iter()
            .any(|h| h.eq_ignore_ascii_case(host))
    }
}

/// Source of policy configuration
///
/// Evaluation reads config fresh per call; the editing surface (allowlist UI,
/// CLI) reads, modifies, and writes back through the same store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the current configuration (defaults merged with overrides)
    async fn load(&self) -> Result<PolicyConfig>;

    /// Persist a configuration
    async fn store(&self, config: PolicyConfig) -> Result<()>;
}

/// In-memory config store
pub struct MemoryConfigStore {
    config: RwLock<PolicyConfig>,
}

impl MemoryConfigStore {
    /// Create a store holding the default configuration
    pub fn new() -> Self {
        Self::with_config(PolicyConfig::default())
    }

    /// Create a store holding a specific configuration
    pub fn with_config(config: PolicyConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Read-modify-write: add a host to the allowlist, skipping duplicates
    pub fn allow_host(&self, host: impl AsRef<str>) {
        let host = host.as_ref().trim();
        if host.is_empty() {
            return;
        }
        let mut config = self.config.write();
        if !config.is_host_allowed(host) {
            config.allowed_hosts.push(host.to_string());
        }
    }
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> Result<PolicyConfig> {
        Ok(self.config.read().clone())
    }

    async fn store(&self, config: PolicyConfig) -> Result<()> {
        *self.config.write() = config;
        Ok(())
    }
}
