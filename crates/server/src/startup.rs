use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use service::{
    article::{ArticleService, SeaOrmArticleRepository},
    storage::AssetStore,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the database, apply pending migrations, and open the asset root.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Runtime(format!("migration failed: {e}")))?;
    info!(event = "migrations_applied");

    let assets = AssetStore::new(&cfg.assets.root)
        .await
        .map_err(|e| StartupError::Runtime(format!("asset root {}: {e}", cfg.assets.root)))?;
    info!(event = "asset_root_ready", root = %assets.root().display());

    let repo = std::sync::Arc::new(SeaOrmArticleRepository::new(db));
    Ok(AppState::new(ArticleService::new(repo, assets)))
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), cfg.assets.max_upload_bytes)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c"),
        _ = terminate => info!(event = "shutdown_signal", signal = "terminate"),
    }
}

/// Serve `cfg` until `shutdown` resolves, then drain in-flight requests.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&cfg)?;
    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "starting article server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(event = "server_drained");
    Ok(())
}
