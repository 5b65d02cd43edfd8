// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `store.rs`

use super::*;
use crate::persistence::memory::MemoryBackend;

fn store_with(backend: &MemoryBackend) -> MappingStore {
    MappingStore::new(Arc::new(backend.clone()))
}

#[tokio::test]
async fn test_reload_parses_backend_contents() {
    let backend = MemoryBackend::with_contents("10.0.0.1 a.example b.example\n");
    let mut store = store_with(&backend);

    store.reload().await;

    assert_eq!(store.mapping().len(), 2);
    assert_eq!(store.mapping().get("a.example").unwrap(), &["10.0.0.1"]);
}

#[tokio::test]
async fn test_reload_discards_in_memory_state() {
    let backend = MemoryBackend::with_contents("10.0.0.1 a.example\n");
    let mut store = store_with(&backend);
    store.insert("stale.example", "10.9.9.9");

    store.reload().await;

    assert!(store.mapping().get("stale.example").is_none());
    assert!(store.mapping().get("a.example").is_some());
}

#[tokio::test]
async fn test_reload_observes_external_edits() {
    let backend = MemoryBackend::with_contents("10.0.0.1 a.example\n");
    let mut store = store_with(&backend);
    store.reload().await;

    backend.set_contents("10.0.0.2 b.example\n");
    store.reload().await;

    assert!(store.mapping().get("a.example").is_none());
    assert_eq!(store.mapping().get("b.example").unwrap(), &["10.0.0.2"]);
}

#[tokio::test]
async fn test_reload_failure_leaves_mapping_empty() {
    let backend = MemoryBackend::with_contents("10.0.0.1 a.example\n");
    let mut store = store_with(&backend);
    store.reload().await;
    assert!(!store.mapping().is_empty());

    backend.fail_reads(true);
    store.reload().await;

    assert!(store.mapping().is_empty());
}

#[tokio::test]
async fn test_reload_skips_malformed_lines() {
    let backend = MemoryBackend::with_contents("10.0.0.1\n10.0.0.2 b.example\n");
    let mut store = store_with(&backend);

    store.reload().await;

    assert_eq!(store.mapping().len(), 1);
    assert!(store.mapping().get("b.example").is_some());
}

#[tokio::test]
async fn test_flush_writes_serialized_mapping() {
    let backend = MemoryBackend::new();
    let mut store = store_with(&backend);
    store.insert("a.example", "10.0.0.1");
    store.insert("b.example", "10.0.0.1");

    store.flush().await.unwrap();

    assert_eq!(
        backend.contents().unwrap(),
        "10.0.0.1 a.example b.example\n"
    );
}

#[tokio::test]
async fn test_flush_returns_backend_error() {
    let backend = MemoryBackend::new();
    backend.fail_writes(true);
    let mut store = store_with(&backend);
    store.insert("a.example", "10.0.0.1");

    assert!(store.flush().await.is_err());
    assert!(backend.contents().is_none());
}

#[tokio::test]
async fn test_remove_only_ip_deletes_host() {
    let backend = MemoryBackend::with_contents("10.0.0.1 a.example\n");
    let mut store = store_with(&backend);
    store.reload().await;

    assert!(store.remove("a.example", "10.0.0.1"));

    assert!(store.mapping().get("a.example").is_none());
    assert_eq!(store.backend_kind(), "memory");
}
