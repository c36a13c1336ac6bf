use crate::catalog::AggregationService;
use crate::config::Config;
use crate::critics::{CriticScoreSource, DisabledSource, RottenTomatoesScraper};
use crate::rating::RatingResolver;
use crate::tmdb::{MovieDatabase, TmdbClient};
use anyhow::{Context, Result};
use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes_api;

pub use error::ApiError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Public read operations plus the rating resolver they use
    pub catalog: AggregationService,
}

impl AppContext {
    /// Build a context from explicit collaborators.
    pub fn new(
        config: Config,
        db: Arc<dyn MovieDatabase>,
        critics: Arc<dyn CriticScoreSource>,
    ) -> Self {
        let resolver = RatingResolver::new(critics);
        let catalog = AggregationService::new(db, resolver, &config);
        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    /// Build a context backed by the real TMDB and Rotten Tomatoes clients.
    pub fn from_config(config: Config) -> Self {
        let http = reqwest::Client::new();
        let db: Arc<dyn MovieDatabase> = Arc::new(TmdbClient::with_client(http.clone(), &config.tmdb));
        let critics: Arc<dyn CriticScoreSource> = if config.critics.enabled {
            Arc::new(RottenTomatoesScraper::with_client(http, &config.critics))
        } else {
            tracing::info!("Critic score lookups disabled");
            Arc::new(DisabledSource)
        };
        Self::new(config, db, critics)
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes_api::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let app = create_router(AppContext::from_config(config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
