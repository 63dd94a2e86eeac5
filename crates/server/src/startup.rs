use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::tuan::repo::{FileTuanRepository, SeaOrmTuanRepository};
use service::tuan::TuanRepository;

use crate::errors::StartupError;
use crate::routes::{self, RouteTable};
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse::<SocketAddr>()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Open the configured storage backend.
pub async fn open_repository(cfg: &AppConfig) -> Result<Arc<dyn TuanRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
            let repo = FileTuanRepository::open(&cfg.storage.data_dir).await?;
            info!(data_dir = %cfg.storage.data_dir, "using file storage");
            Ok(Arc::new(repo))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Storage(format!("migrations: {e}")))?;
            info!("using postgres storage");
            Ok(Arc::new(SeaOrmTuanRepository::new(db)))
        }
    }
}

/// Public entry: build the app from `cfg`, bind and serve.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = open_repository(&cfg).await?;
    let state = AppState::new(repo, cfg.app.env);
    let app = routes::build_router(state, &RouteTable::default(), build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, env = ?cfg.app.env, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
