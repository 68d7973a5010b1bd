//! WorkBee API Server

use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workbee_api::{AppState, routes};
use workbee_config::{LogConfig, LogFormat, WorkBeeConfig, load_config};
use workbee_core::RecordStore;
use workbee_store::{
    MemoryIdentityProvider, MemoryRecordStore, PgRecordStore, create_pool, run_migrations,
};

const DEFAULT_CONFIG: &str = "workbee.kdl";

fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_config() -> anyhow::Result<WorkBeeConfig> {
    match std::env::var("WORKBEE_CONFIG") {
        Ok(path) => Ok(load_config(path)?),
        Err(_) if Path::new(DEFAULT_CONFIG).exists() => Ok(load_config(DEFAULT_CONFIG)?),
        Err(_) => Ok(WorkBeeConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = read_config()?;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.server.database_url = Some(url);
    }

    init_tracing(&config.log);

    let records: Arc<dyn RecordStore> = match &config.server.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Database connected");
            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            info!("No database configured, keeping records in memory");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let state = AppState::new(&config, Arc::new(MemoryIdentityProvider::new()), records);
    let _simulator = state.simulator.start();
    info!(workers = config.roster.len(), "Matching simulator running");

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = config.server.bind;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
