// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The authoritative in-memory mapping and its persistence cycle.
//!
//! A [`MappingStore`] owns the current [`Mapping`] and the injected
//! [`HostsfileBackend`]. It is never trusted across operations: every caller
//! starts with [`MappingStore::reload`], which discards in-memory state and
//! re-reads the backend so out-of-band edits are observed.
//!
//! The store does no locking of its own. The
//! [`HostsfileProvider`](crate::provider::HostsfileProvider) keeps it behind a
//! single mutex held for the whole of each operation.

use crate::errors::BackendError;
use crate::hostsfile;
use crate::mapping::Mapping;
use crate::metrics;
use crate::persistence::HostsfileBackend;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct MappingStore {
    mapping: Mapping,
    backend: Arc<dyn HostsfileBackend>,
}

impl MappingStore {
    pub fn new(backend: Arc<dyn HostsfileBackend>) -> Self {
        Self {
            mapping: Mapping::new(),
            backend,
        }
    }

    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    #[must_use]
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    pub fn insert(&mut self, host: &str, ip: &str) {
        self.mapping.insert(host, ip);
    }

    pub fn remove(&mut self, host: &str, ip: &str) -> bool {
        self.mapping.remove(host, ip)
    }

    /// Rebuild the mapping from the backend.
    ///
    /// A read failure is logged and leaves the mapping empty. Callers cannot
    /// tell "no records" apart from "storage unreadable".
    pub async fn reload(&mut self) {
        self.mapping.clear();

        let contents = match self.backend.read().await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read hosts file: {}", e);
                metrics::record_backend_failure(self.backend.kind(), "read");
                metrics::set_managed_hosts(0);
                return;
            }
        };

        let parsed = hostsfile::parse(&contents);
        if !parsed.malformed.is_empty() {
            metrics::record_malformed_lines(parsed.malformed.len());
        }
        self.mapping = parsed.mapping;

        debug!(
            backend = self.backend.kind(),
            hosts = self.mapping.len(),
            "Reloaded hosts mapping"
        );
        metrics::set_managed_hosts(self.mapping.len());
    }

    /// Serialize the full mapping and hand it to the backend.
    ///
    /// The error is returned for the caller to log; the applier never
    /// propagates it further.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the write fails.
    pub async fn flush(&self) -> Result<(), BackendError> {
        let contents = hostsfile::serialize(&self.mapping);

        if let Err(e) = self.backend.write(&contents).await {
            metrics::record_backend_failure(self.backend.kind(), "write");
            return Err(e);
        }

        debug!(
            backend = self.backend.kind(),
            hosts = self.mapping.len(),
            bytes = contents.len(),
            "Flushed hosts mapping"
        );
        metrics::set_managed_hosts(self.mapping.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
