//! HTTP front end: axum router, shared state and server lifecycle.

pub mod error;
pub mod handlers;
pub mod views;

use crate::adapters::{FioClient, StaticKeyStore};
use crate::config::ServerSettings;
use crate::core::catalog::CatalogService;
use crate::core::shipping::ShippingService;
use crate::domain::ports::{ApiKeyStore, FioSource};
use crate::utils::error::{PrunError, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub shipping: ShippingService,
    /// Header carrying the signed-in dashboard user, lower-case.
    pub identity_header: Arc<str>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn FioSource>,
        keys: Arc<dyn ApiKeyStore>,
        default_api_key: Option<String>,
        identity_header: &str,
    ) -> Self {
        Self {
            catalog: CatalogService::new(source.clone()),
            shipping: ShippingService::new(source, keys, default_api_key),
            identity_header: Arc::from(identity_header.to_ascii_lowercase()),
        }
    }

    pub fn from_settings(settings: &ServerSettings) -> Result<Self> {
        let client = FioClient::new(&settings.fio_base_url, settings.request_timeout)?;
        let keys = StaticKeyStore::new(settings.api_keys.clone());
        tracing::info!(
            "🔑 {} saved API keys, server key: {}",
            keys.len(),
            if settings.fio_api_key.is_some() { "yes" } else { "no" }
        );

        Ok(Self::new(
            Arc::new(client),
            Arc::new(keys),
            settings.fio_api_key.clone(),
            &settings.identity_header,
        ))
    }
}

pub fn create_router() -> Router<AppState> {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            tracing::info_span!("http_request", method = %req.method(), uri = %req.uri())
        })
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        );

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/materials", get(handlers::materials))
        .route("/stocks", get(handlers::stocks))
        .route("/exchange", get(handlers::exchange_redirect))
        .route("/exchange/", get(handlers::exchange_redirect))
        .route("/exchange/{category}", get(handlers::exchange_category))
        .route("/shipping", get(handlers::shipping))
        .layer(trace)
}

pub fn app(state: AppState) -> Router {
    create_router().with_state(state)
}

pub async fn start_server(settings: &ServerSettings) -> Result<()> {
    let state = AppState::from_settings(settings)?;
    let router = app(state);

    tracing::info!("🌐 Binding to {}", settings.listen);
    let listener = TcpListener::bind(&settings.listen).await?;
    tracing::info!("🚀 Dashboard running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(PrunError::IoError)?;

    tracing::info!("👋 Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
