// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for persistence backends and startup configuration.
//!
//! This module provides specialized error types for:
//! - Reading and writing the hosts file on local disk
//! - Reading and upserting the hosts `ConfigMap` through the Kubernetes API
//! - Validating the process configuration before serving
//!
//! Backend errors never reach the external-dns caller. The store logs them and
//! degrades to an empty mapping (on read) or an unpersisted apply (on write).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`HostsfileBackend`](crate::persistence::HostsfileBackend).
#[derive(Error, Debug)]
pub enum BackendError {
    /// The hosts file could not be opened or read
    #[error("Failed to read hosts file {}: {source}", .path.display())]
    FileRead {
        /// Configured hosts file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The hosts file could not be created, truncated or written
    #[error("Failed to write hosts file {}: {source}", .path.display())]
    FileWrite {
        /// Configured hosts file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The `ConfigMap` could not be fetched (missing, forbidden, API unreachable)
    #[error("Error reading ConfigMap {namespace}/{name}: {reason}")]
    ConfigMapRead {
        namespace: String,
        name: String,
        reason: String,
    },

    /// The `ConfigMap` exists but does not carry the hosts key
    #[error("ConfigMap {namespace}/{name} does not contain key {key}")]
    ConfigMapKeyMissing {
        namespace: String,
        name: String,
        key: String,
    },

    /// Both the replace and the create-fallback failed
    #[error(
        "Couldn't update or create ConfigMap {namespace}/{name}: update failed ({update_reason}), create failed ({create_reason})"
    )]
    ConfigMapUpsert {
        namespace: String,
        name: String,
        update_reason: String,
        create_reason: String,
    },
}

/// Fatal configuration errors detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `--backend file` without `--hosts-file`
    #[error("No hosts file path provided: --hosts-file is required for the file backend")]
    MissingHostsFile,

    /// `--backend configmap` without `--configmap-namespace`
    #[error("--configmap-namespace is required for the configmap backend")]
    MissingConfigMapNamespace,

    /// `--backend configmap` without `--configmap-name`
    #[error("--configmap-name is required for the configmap backend")]
    MissingConfigMapName,
}
