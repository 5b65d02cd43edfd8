// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line configuration.
//!
//! ```text
//! hostsfile-webhook --hosts-file /data/hosts
//! hostsfile-webhook --backend configmap \
//!     --configmap-namespace dns --configmap-name external-hosts
//! ```
//!
//! Missing settings for the selected backend are a fatal startup error,
//! reported before anything starts listening.

use crate::constants::{DEFAULT_HEALTH_LISTEN_ADDRESS, DEFAULT_WEBHOOK_LISTEN_ADDRESS};
use crate::errors::ConfigError;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the hosts file is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// A file on local disk
    #[default]
    File,
    /// A key inside a Kubernetes `ConfigMap`
    Configmap,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "hostsfile-webhook",
    version,
    about = "external-dns webhook provider storing A records in a hosts file"
)]
pub struct Args {
    /// Path to the hosts file to update (file backend)
    #[arg(long)]
    pub hosts_file: Option<PathBuf>,

    /// Storage backend for the hosts file
    #[arg(long, value_enum, default_value_t = BackendKind::File)]
    pub backend: BackendKind,

    /// Namespace of the ConfigMap holding the hosts file (configmap backend)
    #[arg(long)]
    pub configmap_namespace: Option<String>,

    /// Name of the ConfigMap holding the hosts file (configmap backend)
    #[arg(long)]
    pub configmap_name: Option<String>,

    /// Address for the external-dns webhook API
    #[arg(long, default_value = DEFAULT_WEBHOOK_LISTEN_ADDRESS)]
    pub listen_address: SocketAddr,

    /// Address for the health and metrics endpoints
    #[arg(long, default_value = DEFAULT_HEALTH_LISTEN_ADDRESS)]
    pub health_listen_address: SocketAddr,
}

/// Validated backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSettings {
    File { path: PathBuf },
    ConfigMap { namespace: String, name: String },
}

impl Args {
    /// Check that the selected backend has everything it needs.
    ///
    /// Settings belonging to the other backend are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first missing setting.
    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        match self.backend {
            BackendKind::File => {
                let path = non_empty_path(self.hosts_file.as_ref())
                    .ok_or(ConfigError::MissingHostsFile)?;
                Ok(BackendSettings::File { path })
            }
            BackendKind::Configmap => {
                let namespace = non_empty(self.configmap_namespace.as_deref())
                    .ok_or(ConfigError::MissingConfigMapNamespace)?;
                let name = non_empty(self.configmap_name.as_deref())
                    .ok_or(ConfigError::MissingConfigMapName)?;
                Ok(BackendSettings::ConfigMap { namespace, name })
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn non_empty_path(value: Option<&PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty()).cloned()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
