// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use hostsfile_webhook::{
    config::{Args, BackendSettings},
    constants::TOKIO_WORKER_THREADS,
    persistence::{ConfigMapBackend, FileBackend, HostsfileBackend},
    provider::{HostsfileProvider, Provider},
    webhook::{health_router, webhook_router, SharedProvider},
};
use kube::Client;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let args = Args::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("hostsfile-webhook")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(args))
}

fn init_logging() {
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Respects RUST_LOG_FORMAT environment variable for output format (json or text)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(args: Args) -> Result<()> {
    init_logging();

    let settings = args
        .backend_settings()
        .context("Invalid configuration")?;

    let backend: Arc<dyn HostsfileBackend> = match &settings {
        BackendSettings::File { path } => {
            let backend = FileBackend::new(path);
            info!("Using hosts file {}", backend.path().display());
            Arc::new(backend)
        }
        BackendSettings::ConfigMap { namespace, name } => {
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                debug!("rustls crypto provider already installed");
            }

            debug!("Initializing Kubernetes client");
            let client = Client::try_default()
                .await
                .context("Failed to create Kubernetes client")?;
            info!("Using ConfigMap {}/{}", namespace, name);
            Arc::new(ConfigMapBackend::new(client, namespace, name))
        }
    };

    let provider = HostsfileProvider::new(backend);

    // Warm up: surfaces read problems in the logs before the first request.
    let initial = provider.records().await;
    info!("Loaded {} hostnames", initial.len());

    let provider: SharedProvider = Arc::new(provider);

    let webhook_listener = TcpListener::bind(args.listen_address)
        .await
        .with_context(|| format!("Failed to bind webhook listener on {}", args.listen_address))?;
    let health_listener = TcpListener::bind(args.health_listen_address)
        .await
        .with_context(|| {
            format!(
                "Failed to bind health listener on {}",
                args.health_listen_address
            )
        })?;

    info!(
        "Listening on {} (webhook) and {} (health, metrics)",
        args.listen_address, args.health_listen_address
    );

    let webhook_server = serve(webhook_listener, webhook_router(provider));
    let health_server = serve(health_listener, health_router());

    tokio::select! {
        result = webhook_server => {
            if let Err(e) = &result {
                error!("Webhook server exited with error: {:?}", e);
            }
            result?;
        }
        result = health_server => {
            if let Err(e) = &result {
                error!("Health server exited with error: {:?}", e);
            }
            result?;
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Serve `router` on `listener` until [`shutdown_signal`] resolves.
async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolve on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
