// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The reconciliation contract external-dns drives.
//!
//! [`Provider`] is the four-operation interface the webhook serves.
//! [`HostsfileProvider`] implements it over a [`MappingStore`] kept behind a
//! single mutex.
//!
//! # Concurrency
//!
//! `records` and `apply_changes` hold the mutex for their full duration,
//! backend I/O included, so they never overlap with each other or with
//! themselves. There are no timeouts: a slow backend stalls every pending
//! call until it returns.

use crate::applier::{self, ApplySummary};
use crate::constants::{RECORD_TTL_SECS, RECORD_TYPE_A};
use crate::endpoint::{Changes, DomainFilter, Endpoint};
use crate::metrics;
use crate::persistence::HostsfileBackend;
use crate::store::MappingStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::debug;

/// Operations external-dns expects from a DNS provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Current records, one per hostname.
    async fn records(&self) -> Vec<Endpoint>;

    /// Apply a change batch. Always succeeds from the caller's point of view.
    async fn apply_changes(&self, changes: Changes) -> ApplySummary;

    /// Normalize endpoint metadata to what this provider can store.
    fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Vec<Endpoint>;

    /// Domains this provider is responsible for.
    fn domain_filter(&self) -> DomainFilter;
}

/// Provider keeping records in a hosts file.
pub struct HostsfileProvider {
    store: Mutex<MappingStore>,
}

impl HostsfileProvider {
    pub fn new(backend: Arc<dyn HostsfileBackend>) -> Self {
        Self {
            store: Mutex::new(MappingStore::new(backend)),
        }
    }
}

#[async_trait]
impl Provider for HostsfileProvider {
    async fn records(&self) -> Vec<Endpoint> {
        let start = Instant::now();
        let mut store = self.store.lock().await;

        store.reload().await;

        let records: Vec<Endpoint> = store
            .mapping()
            .iter()
            .map(|(host, ips)| Endpoint {
                dns_name: host.to_string(),
                targets: ips.to_vec(),
                record_type: RECORD_TYPE_A.to_string(),
                record_ttl: RECORD_TTL_SECS,
                ..Default::default()
            })
            .collect();

        debug!(
            backend = store.backend_kind(),
            count = records.len(),
            "Returning records"
        );
        metrics::record_operation("records", start.elapsed());
        records
    }

    async fn apply_changes(&self, changes: Changes) -> ApplySummary {
        let start = Instant::now();
        let mut store = self.store.lock().await;

        let summary = applier::apply_changes(&mut store, &changes).await;

        debug!(
            backend = store.backend_kind(),
            inserted = summary.inserted,
            removed = summary.removed,
            skipped = summary.skipped,
            persisted = summary.persisted,
            "Applied changes"
        );
        metrics::record_operation("apply_changes", start.elapsed());
        summary
    }

    fn adjust_endpoints(&self, mut endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
        for endpoint in &mut endpoints {
            endpoint.record_ttl = RECORD_TTL_SECS;
            endpoint.labels.clear();
        }
        endpoints
    }

    fn domain_filter(&self) -> DomainFilter {
        DomainFilter::match_all()
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
