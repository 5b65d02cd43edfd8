// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Applies an external-dns change batch to the mapping store.
//!
//! # Algorithm
//!
//! 1. Reload the store, discarding whatever was in memory
//! 2. `Create` entries: insert every target (entries with no targets, a
//!    record type other than `A`, or a hostname or target that cannot be
//!    written as a hosts file field are skipped whole)
//! 3. `Delete` entries: remove every target
//! 4. `UpdateOld` entries: remove every target
//! 5. `UpdateNew` entries: same rules as `Create`
//! 6. Flush once, whatever happened above
//!
//! Lists are processed in that fixed order with no merging across lists, so a
//! hostname both deleted and created in one batch ends up deleted then
//! re-inserted.
//!
//! # Persistence policy
//!
//! Flushing is best effort. A failed write is logged and reported through
//! [`ApplySummary::persisted`] but never surfaces as an error: external-dns
//! always sees the batch as applied.

use crate::constants::RECORD_TYPE_A;
use crate::endpoint::{Changes, Endpoint};
use crate::hostsfile;
use crate::metrics;
use crate::store::MappingStore;
use tracing::{debug, info, warn};

/// What a single [`apply_changes`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// `(host, ip)` pairs inserted
    pub inserted: usize,
    /// `(host, ip)` pairs that were present and removed
    pub removed: usize,
    /// Entries skipped (no targets, unsupported record type, invalid fields)
    pub skipped: usize,
    /// Whether the final flush reached the backend
    pub persisted: bool,
}

/// Apply `changes` to `store` and flush the result.
///
/// The caller must hold exclusive access to the store for the whole call.
pub async fn apply_changes(store: &mut MappingStore, changes: &Changes) -> ApplySummary {
    let mut summary = ApplySummary::default();

    store.reload().await;

    if changes.is_empty() {
        debug!("Empty change batch, rewriting current mapping");
    }

    for endpoint in &changes.create {
        info!("Creating endpoint {}", endpoint);
        insert_endpoint(store, endpoint, &mut summary);
    }

    for endpoint in &changes.delete {
        info!("Deleting endpoint {}", endpoint);
        remove_endpoint(store, endpoint, &mut summary);
    }

    for (i, endpoint) in changes.update_old.iter().enumerate() {
        info!("Removing existing endpoint {} for update {}", i, endpoint);
        remove_endpoint(store, endpoint, &mut summary);
    }

    for (i, endpoint) in changes.update_new.iter().enumerate() {
        info!("Updating endpoint {} for update {}", i, endpoint);
        insert_endpoint(store, endpoint, &mut summary);
    }

    match store.flush().await {
        Ok(()) => summary.persisted = true,
        Err(e) => warn!("Failed to write hosts file: {}", e),
    }

    summary
}

fn insert_endpoint(store: &mut MappingStore, endpoint: &Endpoint, summary: &mut ApplySummary) {
    if endpoint.targets.is_empty() {
        warn!("Endpoint {} contained no targets", endpoint.dns_name);
        metrics::record_skipped_change("no_targets");
        summary.skipped += 1;
        return;
    }

    if endpoint.record_type != RECORD_TYPE_A {
        warn!(
            "Only A records are supported, received {:?} for {}",
            endpoint.record_type, endpoint.dns_name
        );
        metrics::record_skipped_change("unsupported_type");
        summary.skipped += 1;
        return;
    }

    if !hostsfile::is_valid_field(&endpoint.dns_name)
        || !endpoint.targets.iter().all(|t| hostsfile::is_valid_field(t))
    {
        warn!(
            "Endpoint {:?} has a hostname or target that cannot be stored: {:?}",
            endpoint.dns_name, endpoint.targets
        );
        metrics::record_skipped_change("invalid_target");
        summary.skipped += 1;
        return;
    }

    for target in &endpoint.targets {
        if store
            .mapping()
            .get(&endpoint.dns_name)
            .is_some_and(|ips| ips.contains(target))
        {
            debug!("{} already maps to {}, adding duplicate", endpoint.dns_name, target);
        }
        store.insert(&endpoint.dns_name, target);
        summary.inserted += 1;
    }
}

fn remove_endpoint(store: &mut MappingStore, endpoint: &Endpoint, summary: &mut ApplySummary) {
    for target in &endpoint.targets {
        if store.remove(&endpoint.dns_name, target) {
            summary.removed += 1;
        }
    }
}

#[cfg(test)]
#[path = "applier_tests.rs"]
mod applier_tests;
