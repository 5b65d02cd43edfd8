// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory backend used by unit tests.
//!
//! Holds the blob behind a mutex and can be told to fail reads or writes so
//! the store's fail-open and best-effort paths can be exercised.

use super::HostsfileBackend;
use crate::errors::BackendError;
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    contents: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// Cloneable handle to a shared in-memory blob.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryBackend {
    inner: Arc<Inner>,
}

impl MemoryBackend {
    /// Backend with no blob yet; reads fail until something is written.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_contents(contents: &str) -> Self {
        let backend = Self::new();
        backend.set_contents(contents);
        backend
    }

    pub(crate) fn set_contents(&self, contents: &str) {
        *self.inner.contents.lock().unwrap() = Some(contents.to_string());
    }

    pub(crate) fn contents(&self) -> Option<String> {
        self.inner.contents.lock().unwrap().clone()
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, failed ones included.
    pub(crate) fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostsfileBackend for MemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn read(&self) -> Result<String, BackendError> {
        let contents = self.contents();
        match contents {
            Some(contents) if !self.inner.fail_reads.load(Ordering::SeqCst) => Ok(contents),
            _ => Err(BackendError::FileRead {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::NotFound, "no contents"),
            }),
        }
    }

    async fn write(&self, contents: &str) -> Result<(), BackendError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::FileWrite {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled"),
            });
        }
        self.set_contents(contents);
        Ok(())
    }
}
