// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor registry
//!
//! The single composition point. Capabilities are captured once here and
//! handed to the adapters; nothing downstream touches globals.

use std::sync::Arc;

use super::{BeaconInterceptor, FetchInterceptor, FormInterceptor, Gate, XhrInterceptor};
use crate::policy::ConfigStore;
use crate::send::SendPrimitives;
use crate::sink::{HistoryLog, Notifier};

/// Installed set of pathway adapters
pub struct InterceptorRegistry {
    form: FormInterceptor,
    fetch: FetchInterceptor,
    xhr: XhrInterceptor,
    beacon: BeaconInterceptor,
    history: HistoryLog,
}

impl InterceptorRegistry {
    /// Install adapters over a capability table
    ///
    /// `history` is shared: the registry appends, the display surface reads
    /// and clears through its own clone.
    pub fn install(
        primitives: SendPrimitives,
        config: Arc<dyn ConfigStore>,
        history: HistoryLog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let gate = Arc::new(Gate::new(config, history.clone(), notifier));

        Self {
            form: FormInterceptor::new(gate.clone(), primitives.form, primitives.form_call),
            fetch: FetchInterceptor::new(gate.clone(), primitives.fetch),
            xhr: XhrInterceptor::new(gate.clone(), primitives.xhr),
            beacon: BeaconInterceptor::new(gate, primitives.beacon),
            history,
        }
    }

    /// Form submission adapter
    pub fn form(&self) -> &FormInterceptor {
        &self.form
    }

    /// Fetch adapter
    pub fn fetch(&self) -> &FetchInterceptor {
        &self.fetch
    }

    /// XHR adapter
    pub fn xhr(&self) -> &XhrInterceptor {
        &self.xhr
    }

    /// Beacon adapter
    pub fn beacon(&self) -> &BeaconInterceptor {
        &self.beacon
    }

    /// The blocked-attempt history log
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MemoryConfigStore;
    use crate::sink::NullNotifier;

    #[tokio::test]
    async fn test_install_with_default_primitives() {
        let registry = InterceptorRegistry::install(
            SendPrimitives::capture().unwrap(),
            Arc::new(MemoryConfigStore::new()),
            HistoryLog::new(),
            Arc::new(NullNotifier),
        );
        assert!(registry.history().is_empty());
    }
}
