// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # hostsfile-webhook - external-dns provider backed by a hosts file
//!
//! This crate implements an [external-dns](https://github.com/kubernetes-sigs/external-dns)
//! webhook provider that keeps `A` records in a plain hosts file. The file can
//! live on local disk or inside a Kubernetes `ConfigMap`, which makes it easy
//! to feed into CoreDNS's `hosts` plugin or dnsmasq.
//!
//! ## Overview
//!
//! Every operation follows the same cycle:
//!
//! 1. Lock the store
//! 2. Reload the hosts file from its backend (out-of-band edits are picked up)
//! 3. Read or mutate the in-memory mapping
//! 4. For changes, rewrite the whole file
//!
//! ## Modules
//!
//! - [`hostsfile`] - Hosts file text codec
//! - [`mapping`] - Hostname to IP address mapping
//! - [`persistence`] - File and `ConfigMap` storage backends
//! - [`store`] - Mapping store with reload/flush
//! - [`applier`] - Change batch application
//! - [`provider`] - The external-dns provider contract
//! - [`webhook`] - axum routers for the webhook protocol
//! - [`config`] - Command line configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use hostsfile_webhook::endpoint::{Changes, Endpoint};
//! use hostsfile_webhook::persistence::FileBackend;
//! use hostsfile_webhook::provider::{HostsfileProvider, Provider};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let provider = HostsfileProvider::new(Arc::new(FileBackend::new("/data/hosts")));
//!
//! provider
//!     .apply_changes(Changes {
//!         create: vec![Endpoint::new("app.example", "A", vec!["10.0.0.1".to_string()])],
//!         ..Default::default()
//!     })
//!     .await;
//!
//! let records = provider.records().await;
//! # }
//! ```

pub mod applier;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod errors;
pub mod hostsfile;
pub mod mapping;
pub mod metrics;
pub mod persistence;
pub mod provider;
pub mod store;
pub mod webhook;
