// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocked-attempt history
//!
//! Append-with-cap log of suppressed sends, newest first. The interceptors
//! only ever append; the display surface reads and clears.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::policy::{Decision, PathwayKind, ReasonCode};

/// Default number of retained entries
pub const DEFAULT_HISTORY_CAP: usize = 200;

/// One blocked attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Pathway the attempt came in on
    pub kind: PathwayKind,
    /// Raw destination
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Block reason
    pub reason: ReasonCode,
    /// Optional decision details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// When the attempt was blocked
    pub timestamp: DateTime<Utc>,
    /// Page the attempt originated from
    pub page: String,
}

impl HistoryEntry {
    /// Build an entry from a block decision
    pub fn from_decision(
        kind: PathwayKind,
        url: impl Into<String>,
        method: impl Into<String>,
        page: impl Into<String>,
        decision: &Decision,
    ) -> Self {
        Self {
            kind,
            url: url.into(),
            method: method.into(),
            reason: decision.reason,
            details: decision.details.clone(),
            timestamp: Utc::now(),
            page: page.into(),
        }
    }
}

/// Capped in-memory history log, newest entries first
pub struct HistoryLog {
    entries: Arc<RwLock<VecDeque<HistoryEntry>>>,
    cap: usize,
}

impl HistoryLog {
    /// Create a log with the default cap
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_HISTORY_CAP)
    }

    /// Create a log bounded to the most recent `cap` entries
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            cap,
        }
    }

    /// Append an entry, dropping the oldest beyond the cap
    pub fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write();
        entries.push_front(entry);
        entries.truncate(self.cap);
    }

    /// All retained entries, most recent first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// The most recent `n` entries
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.entries.read().iter().take(n).cloned().collect()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Export the log as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries())
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HistoryLog {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            cap: self.cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> HistoryEntry {
        HistoryEntry::from_decision(
            PathwayKind::Fetch,
            url,
            "POST",
            "https://bank.example/",
            &Decision::block(ReasonCode::CrossOriginWrite),
        )
    }

    #[test]
    fn test_newest_first() {
        let log = HistoryLog::new();
        log.append(entry("https://a.example/"));
        log.append(entry("https://b.example/"));

        let entries = log.entries();
        assert_eq!(entries[0].url, "https://b.example/");
        assert_eq!(entries[1].url, "https://a.example/");
    }

    #[test]
    fn test_cap_drops_oldest() {
        let log = HistoryLog::with_cap(3);
        for i in 0..5 {
            log.append(entry(&format!("https://host{}.example/", i)));
        }

        assert_eq!(log.len(), 3);
        let entries = log.entries();
        assert_eq!(entries[0].url, "https://host4.example/");
        assert_eq!(entries[2].url, "https://host2.example/");
    }

    #[test]
    fn test_clear() {
        let log = HistoryLog::new();
        log.append(entry("https://a.example/"));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_json_export() {
        let log = HistoryLog::new();
        log.append(entry("https://a.example/"));
        let json = log.to_json().unwrap();
        assert!(json.contains("cross_origin_write"));
        assert!(json.contains("https://a.example/"));
    }
}
