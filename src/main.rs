use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use links_signaling::api;
use links_signaling::auth::TokenSigner;
use links_signaling::config::Config;
use links_signaling::directory::LiveKitDirectory;
use links_signaling::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Links signaling server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        livekit_api = %config.livekit_url,
        livekit_ws = %config.livekit_ws_url,
        api_key = %config.api_key,
        "Configuration loaded"
    );

    let signer = TokenSigner::new(&config);
    let directory = LiveKitDirectory::new(&config);

    let addr: SocketAddr = config.server_addr().parse()?;
    let static_dir = config.static_dir.clone();
    let tls_files = config
        .enable_https
        .then(|| (config.ssl_cert_file.clone(), config.ssl_key_file.clone()));

    let state = AppState::new(config, signer, Arc::new(directory));

    // Build router
    let mut app = api::create_router(state);

    if let Some(dir) = static_dir {
        let root = PathBuf::from(&dir);
        tracing::info!(dir = %dir, "Serving static files");
        app = app.fallback_service(
            ServeDir::new(&root).not_found_service(ServeFile::new(root.join("index.html"))),
        );
    }

    let app: Router = app
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    if let Some((cert_file, key_file)) = tls_files {
        let tls = RustlsConfig::from_pem_file(&cert_file, &key_file)
            .await
            .with_context(|| {
                format!("Failed to load TLS certificate {} / key {}", cert_file, key_file)
            })?;

        let handle = Handle::new();
        let shutdown = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
        });

        tracing::info!(address = %addr, "Server listening (HTTPS)");

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;
    } else {
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(address = %addr, "Server listening");

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
