//! Application startup and lifecycle management.

use crate::config::InspectionConfig;
use crate::handlers::{
    analyze::analyze,
    health::health_check,
    training::{delete_training, submit_training, training_history},
};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::providers::InferenceProvider;
use crate::services::{RelayService, TrainingStore};
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: InspectionConfig,
    pub store: Arc<TrainingStore>,
    pub relay: Arc<RelayService>,
}

impl AppState {
    /// Wire the store and relay around `provider`. Does not touch the disk.
    pub fn new(config: InspectionConfig, provider: Arc<dyn InferenceProvider>) -> Self {
        let store = Arc::new(TrainingStore::new(
            config.training.data_path.clone(),
            config.training.max_entries,
        ));
        let relay = Arc::new(RelayService::new(
            store.clone(),
            provider,
            config.training.prompt_examples,
        ));

        Self {
            config,
            store,
            relay,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.http.static_dir);
    let body_limit = state.config.http.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/training", post(submit_training))
        .route("/training-history", get(training_history))
        .route("/training/:id", delete(delete_training))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider from `config`.
    pub async fn build(config: InspectionConfig) -> Result<Self, AppError> {
        let provider = GeminiProvider::new(GeminiConfig::from(&config.gemini)).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an arbitrary provider (port 0 = random port).
    pub async fn build_with_provider(
        config: InspectionConfig,
        provider: Arc<dyn InferenceProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(config, provider);

        state.store.initialize().await.map_err(|e| {
            tracing::error!("Failed to initialize training data file: {}", e);
            AppError::from(e)
        })?;

        let address = state.config.common.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            data_path = %state.store.path().display(),
            static_dir = %state.config.http.static_dir.display(),
            "Inspection service listening"
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
