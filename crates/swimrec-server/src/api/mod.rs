//! HTTP application: router assembly, health endpoints and the serve loop

pub mod response;

use crate::config::{Config, StoreBackend};
use crate::error::ServerResult;
use crate::features::{self, shared::ResourceUrls};
use crate::store::{DynRecordStore, MemoryRecordStore, PgRecordStore};
use crate::{db, middleware};
use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{signal, sync::oneshot};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: DynRecordStore,
    pub urls: ResourceUrls,
}

impl AppState {
    pub fn new(store: DynRecordStore, config: &Config) -> Self {
        Self {
            store,
            urls: ResourceUrls::new(config.public_base_url()),
        }
    }
}

/// Connect the configured record store
pub async fn build_store(config: &Config) -> ServerResult<DynRecordStore> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            Ok(Arc::new(PgRecordStore::new(pool)))
        },
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on shutdown");
            Ok(Arc::new(MemoryRecordStore::new()))
        },
    }
}

/// Run the server until Ctrl+C / SIGTERM
pub async fn serve(config: Config) -> ServerResult<()> {
    let store = build_store(&config).await?;
    let app = create_router(AppState::new(store, &config), &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        backend = %config.store.backend,
        base_url = %config.public_base_url(),
        "Server listening"
    );

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut running = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut running => {
            result??;
            return Ok(());
        },
        () = shutdown_signal() => {},
    }

    let _ = stop_tx.send(());
    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    tracing::info!("Waiting up to {} seconds for connections to close", timeout.as_secs());

    match tokio::time::timeout(timeout, running).await {
        Ok(result) => {
            result??;
            tracing::info!("Server shut down gracefully");
        },
        Err(_) => tracing::warn!("Shutdown timeout elapsed, dropping open connections"),
    }

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_state = features::FeatureState {
        store: state.store.clone(),
        urls: state.urls.clone(),
    };

    // Apply layers from innermost to outermost
    let routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .merge(features::router(feature_state))
        .layer(from_fn(middleware::require_json_content_type))
        .layer(from_fn(middleware::require_json_accept));

    let dispatch = middleware::CorsDispatch {
        with_cors: routes.clone().layer(middleware::cors_layer(&config.cors)),
        config: config.cors.clone(),
    };

    routes
        .layer(from_fn_with_state(dispatch, middleware::dispatch_cors))
        .layer(middleware::tracing_layer())
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hello World!" }))
}

/// Health check handler
async fn health(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Store health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": "disconnected"
                })),
            )
                .into_response()
        },
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
