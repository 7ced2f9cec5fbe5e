// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Best-effort side channels
//!
//! History logging and blocked-send notification. Both are write-only from the
//! interceptors' point of view and both may fail without consequence.

mod history;
mod notify;

pub use history::{HistoryEntry, HistoryLog, DEFAULT_HISTORY_CAP};
pub use notify::{ChannelNotifier, Notice, Notifier, NullNotifier};
