//! Rota server: weekly driver rotation with Telegram reminders.
//!
//! Usage:
//!   rota                          # serve on 0.0.0.0:3000, settings in ./rota.db
//!   rota --config rota.toml       # load configuration from a TOML file
//!   rota --settings-file s.json   # keep settings in a JSON file instead

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use rota_adapters::clock::SystemClock;
use rota_adapters::notify::TelegramNotifier;
use rota_adapters::persistence::{JsonFileStore, SqliteDb};
use rota_app::reminder_service::ReminderService;
use rota_app::rotation_service::RotationService;
use rota_ports::outbound::SettingsRepository;
use rota_server::{build_router, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "rota", version, about = "Weekly driver rotation service")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "ROTA_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Keep settings in this JSON file instead of SQLite
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// Directory with the static web UI
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Reminder poll period in seconds
    #[arg(long)]
    tick_secs: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(path) = self.settings_file {
            config.settings_file = Some(path);
        }
        if let Some(dir) = self.public_dir {
            config.public_dir = dir;
        }
        if let Some(secs) = self.tick_secs {
            config.tick_secs = secs;
        }
        config.check()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "rota=debug,rota_server=debug,rota_app=debug,rota_adapters=debug,tower_http=debug"
    } else {
        "rota=info,rota_server=info,rota_app=info,rota_adapters=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = cli.into_config()?;

    let store: Arc<dyn SettingsRepository> = match &config.settings_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "using JSON settings file");
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            tracing::info!(url = %config.database_url, "using SQLite settings store");
            Arc::new(SqliteDb::new(&config.database_url).await?)
        }
    };
    let notifier = Arc::new(TelegramNotifier::new(Duration::from_secs(
        config.http_timeout_secs,
    ))?);

    let rotation = Arc::new(RotationService::new(
        store.clone(),
        notifier.clone(),
        SystemClock,
    ));
    let reminders = Arc::new(ReminderService::new(store, notifier, SystemClock));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = reminders.spawn(Duration::from_secs(config.tick_secs), shutdown_rx);

    let app = build_router(AppState::new(rotation), &config.public_dir);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, public_dir = %config.public_dir.display(), "rota listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    scheduler.await?;
    tracing::info!("rota stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown requested");
}
