// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `persistence/configmap.rs`
//!
//! A `wiremock` server stands in for the Kubernetes API server.

use super::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NAMESPACE: &str = "dns";
const NAME: &str = "external-hosts";
const OBJECT_PATH: &str = "/api/v1/namespaces/dns/configmaps/external-hosts";
const COLLECTION_PATH: &str = "/api/v1/namespaces/dns/configmaps";

fn client_for(server: &MockServer) -> Client {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let config = kube::Config::new(server.uri().parse().unwrap());
    Client::try_from(config).unwrap()
}

fn configmap_json(data: Value) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": NAME,
            "namespace": NAMESPACE,
            "resourceVersion": "1"
        },
        "data": data
    })
}

fn status_json(code: u16, reason: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Status",
        "metadata": {},
        "status": "Failure",
        "message": format!("configmaps \"{NAME}\" {reason}"),
        "reason": reason,
        "details": { "name": NAME, "kind": "configmaps" },
        "code": code
    })
}

#[tokio::test]
async fn test_read_returns_hosts_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(configmap_json(json!({ "hosts": "10.0.0.1 a.example\n" }))),
        )
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);

    assert_eq!(backend.read().await.unwrap(), "10.0.0.1 a.example\n");
    assert_eq!(backend.kind(), "configmap");
}

#[tokio::test]
async fn test_read_without_hosts_key_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(configmap_json(json!({ "other": "x" }))),
        )
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);
    let err = backend.read().await.unwrap_err();

    assert!(
        matches!(err, BackendError::ConfigMapKeyMissing { ref key, .. } if key == "hosts"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_read_missing_configmap_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(status_json(404, "NotFound")))
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);
    let err = backend.read().await.unwrap_err();

    assert!(matches!(err, BackendError::ConfigMapRead { .. }));
}

#[tokio::test]
async fn test_write_replaces_existing_configmap() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(OBJECT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(configmap_json(json!({ "hosts": "10.0.0.2 b.example\n" }))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);
    backend.write("10.0.0.2 b.example\n").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let put: ConfigMap = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        put.data.unwrap().get(CONFIGMAP_HOSTS_KEY).unwrap(),
        "10.0.0.2 b.example\n"
    );
}

#[tokio::test]
async fn test_write_falls_back_to_create() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(status_json(404, "NotFound")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(configmap_json(json!({ "hosts": "10.0.0.1 a.example\n" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);
    backend.write("10.0.0.1 a.example\n").await.unwrap();

    // Serve back whatever was created so the read observes the written blob.
    let created = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|request| request.method.as_str() == "POST")
        .expect("create request should have been sent");
    let created_body: Value = serde_json::from_slice(&created.body).unwrap();
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_body))
        .mount(&server)
        .await;

    assert_eq!(backend.read().await.unwrap(), "10.0.0.1 a.example\n");
}

#[tokio::test]
async fn test_write_fails_when_update_and_create_fail() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(status_json(404, "NotFound")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(status_json(403, "Forbidden")))
        .mount(&server)
        .await;

    let backend = ConfigMapBackend::new(client_for(&server), NAMESPACE, NAME);
    let err = backend.write("10.0.0.1 a.example\n").await.unwrap_err();

    assert!(matches!(err, BackendError::ConfigMapUpsert { .. }));
}
