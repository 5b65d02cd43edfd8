// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosts file stored on local disk.

use super::HostsfileBackend;
use crate::errors::BackendError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Backend reading and writing a single file at a fixed path.
///
/// Writes create the file if needed and truncate it before writing the new
/// contents.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HostsfileBackend for FileBackend {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn read(&self) -> Result<String, BackendError> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|source| BackendError::FileRead {
                path: self.path.clone(),
                source,
            })
    }

    async fn write(&self, contents: &str) -> Result<(), BackendError> {
        fs::write(&self.path, contents)
            .await
            .map_err(|source| BackendError::FileWrite {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod file_tests;
