// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP surface for external-dns.
//!
//! Two routers are served on separate listeners:
//!
//! | Router | Method | Path | Response |
//! |--------|--------|------|----------|
//! | webhook | GET | `/` | domain filter |
//! | webhook | GET | `/records` | current endpoints |
//! | webhook | POST | `/records` | apply changes, `204 No Content` |
//! | webhook | POST | `/adjustendpoints` | adjusted endpoints |
//! | webhook, health | GET | `/healthz` | `200 OK` |
//! | health | GET | `/metrics` | Prometheus text |
//!
//! JSON responses on the webhook router carry the
//! [`WEBHOOK_MEDIA_TYPE`] content type.

use crate::constants::{HEALTH_PATH, METRICS_SERVER_PATH, WEBHOOK_MEDIA_TYPE};
use crate::endpoint::{Changes, Endpoint};
use crate::metrics;
use crate::provider::Provider;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Provider handle shared by every request.
pub type SharedProvider = Arc<dyn Provider>;

/// Router for the external-dns webhook protocol.
pub fn webhook_router(provider: SharedProvider) -> Router {
    Router::new()
        .route("/", get(negotiate))
        .route("/records", get(get_records).post(apply_changes))
        .route("/adjustendpoints", post(adjust_endpoints))
        .route(HEALTH_PATH, get(healthz))
        .with_state(provider)
}

/// Router for liveness and metrics.
pub fn health_router() -> Router {
    Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(METRICS_SERVER_PATH, get(metrics_handler))
}

fn webhook_json<T: Serialize>(body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => ([(header::CONTENT_TYPE, WEBHOOK_MEDIA_TYPE)], bytes).into_response(),
        Err(e) => {
            error!("Failed to encode webhook response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn negotiate(State(provider): State<SharedProvider>) -> Response {
    let start = Instant::now();
    let filter = provider.domain_filter();
    metrics::record_operation("negotiate", start.elapsed());
    webhook_json(&filter)
}

async fn get_records(State(provider): State<SharedProvider>) -> Response {
    let records = provider.records().await;
    debug!("Returning {} records", records.len());
    webhook_json(&records)
}

async fn apply_changes(
    State(provider): State<SharedProvider>,
    Json(changes): Json<Changes>,
) -> StatusCode {
    // Run to completion even if the client goes away mid-request, so a batch
    // is never cut off between mutation and flush.
    let handle = tokio::spawn(async move { provider.apply_changes(changes).await });

    match handle.await {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => {
            error!("Apply changes task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn adjust_endpoints(
    State(provider): State<SharedProvider>,
    Json(endpoints): Json<Vec<Endpoint>>,
) -> Response {
    let start = Instant::now();
    let adjusted = provider.adjust_endpoints(endpoints);
    metrics::record_operation("adjust_endpoints", start.elapsed());
    webhook_json(&adjusted)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to gather metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod webhook_tests;
