use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openly::auth::spawn_expiry_sweep;
use openly::config::ServerConfig;
use openly::server::{AppState, create_router};
use openly::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "openly", version)]
#[command(about = "A minimal URL shortener", long_about = None)]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "OPENLY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, short, env = "PORT", default_value = "3000")]
    port: u16,

    /// SQLite database file
    #[arg(long, env = "OPENLY_DB", default_value = "openly.db")]
    db: PathBuf,

    /// Password for the admin panel
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    admin_password: String,

    /// Seconds between sweeps of expired sessions (0 disables)
    #[arg(long, env = "OPENLY_SESSION_SWEEP_SECS", default_value = "3600")]
    session_sweep_secs: u64,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            db_path: cli.db,
            admin_password: cli.admin_password,
            session_sweep_interval: std::time::Duration::from_secs(cli.session_sweep_secs),
            ..ServerConfig::default()
        }
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => info!("No .env file found, using default values"),
        Err(e) => tracing::warn!("Failed to load .env file: {e}"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("openly=info".parse()?))
        .init();

    info!("Starting openly {}", env!("CARGO_PKG_VERSION"));
    load_dotenv();

    let config = ServerConfig::from(Cli::parse());

    let store = SqliteStore::new(&config.db_path)?;
    store.initialize()?;
    info!("Using database {}", config.db_path.display());

    let state = Arc::new(AppState::new(Arc::new(store), &config));
    spawn_expiry_sweep(state.sessions.clone(), config.session_sweep_interval);

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
