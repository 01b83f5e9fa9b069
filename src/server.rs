use crate::config::Config;
use crate::database::Database;
use crate::error::StoreError;
use crate::handlers::{
    admin_metrics, admin_reset, create_chirp, list_chirps, readiness, validate_chirp, AppState,
};
use crate::middleware::{logging_middleware, metrics_inc};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::path::Path;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the full router: API routes, the counted static file tree under
/// `/app`, and the logging layers wrapped around both.
pub fn create_app(state: AppState, filepath_root: impl AsRef<Path>) -> Router {
    // The counter wraps only the file service so unmatched paths never count.
    let file_server = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(state.hits.clone(), metrics_inc))
        .service(ServeDir::new(filepath_root.as_ref()));

    Router::new()
        .route("/api/healthz", get(readiness))
        .route("/api/validate_chirp", post(validate_chirp))
        .route("/api/chirps", post(create_chirp).get(list_chirps))
        .route("/api/admin/metrics", get(admin_metrics))
        .route("/api/admin/reset", get(admin_reset))
        .nest_service("/app", file_server)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        )
}

pub struct Server {
    app: Router,
    config: Config,
}

impl Server {
    /// Open the database and assemble the router
    pub async fn new(config: Config) -> Result<Self, StoreError> {
        let db = Database::open(&config.database_path).await?;
        tracing::info!(
            "Opened database {} with {} chirps",
            db.path().display(),
            db.len().await?
        );
        let app = create_app(AppState::new(db), &config.filepath_root);

        Ok(Self { app, config })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.resolve_bind_address().await?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!(
            "Serving files from {} on {}",
            self.config.filepath_root.display(),
            addr
        );

        axum::serve(
            listener,
            self.app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
