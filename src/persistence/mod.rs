// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Storage media for the raw hosts file blob.
//!
//! The [`MappingStore`](crate::store::MappingStore) only ever talks to a
//! [`HostsfileBackend`]. Two implementations are provided:
//!
//! - [`file::FileBackend`] - a plain file on local disk
//! - [`configmap::ConfigMapBackend`] - a key inside a Kubernetes `ConfigMap`
//!
//! Both read and write the whole blob; there is no partial update.

pub mod configmap;
pub mod file;

#[cfg(test)]
pub(crate) mod memory;

pub use configmap::ConfigMapBackend;
pub use file::FileBackend;

use crate::errors::BackendError;
use async_trait::async_trait;

/// Read/write access to the hosts file blob on some storage medium.
#[async_trait]
pub trait HostsfileBackend: Send + Sync {
    /// Short label used in logs and metrics (`file`, `configmap`).
    fn kind(&self) -> &'static str;

    /// Fetch the full hosts file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    async fn read(&self) -> Result<String, BackendError>;

    /// Replace the full hosts file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents could not be persisted.
    async fn write(&self, contents: &str) -> Result<(), BackendError>;
}
