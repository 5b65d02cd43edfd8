// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the hosts file webhook.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// DNS Record Constants
// ============================================================================

/// The only record type this provider manages
pub const RECORD_TYPE_A: &str = "A";

/// TTL reported for every record (hosts files carry no TTL)
pub const RECORD_TTL_SECS: i64 = 10;

// ============================================================================
// Hosts File Format Constants
// ============================================================================

/// Lines starting with this character are comments
pub const HOSTS_COMMENT_PREFIX: char = '#';

/// Minimum whitespace-separated fields on a valid line (IP plus one hostname)
pub const HOSTS_MIN_FIELDS: usize = 2;

// ============================================================================
// ConfigMap Backend Constants
// ============================================================================

/// Reserved key inside the `ConfigMap` holding the hosts file contents
pub const CONFIGMAP_HOSTS_KEY: &str = "hosts";

// ============================================================================
// Webhook Server Constants
// ============================================================================

/// Media type spoken by the external-dns webhook protocol
pub const WEBHOOK_MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

/// Default bind address for the webhook API (external-dns expects port 8888)
pub const DEFAULT_WEBHOOK_LISTEN_ADDRESS: &str = "0.0.0.0:8888";

/// Default bind address for health and metrics
pub const DEFAULT_HEALTH_LISTEN_ADDRESS: &str = "0.0.0.0:8080";

/// Path for the liveness endpoint
pub const HEALTH_PATH: &str = "/healthz";

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 2;
