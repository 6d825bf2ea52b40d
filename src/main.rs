//! sample-auth server entry point
//!
//! Loads `sample-auth.toml`, opens the user store and serves the sign-up,
//! sign-in and sign-out endpoints.

use anyhow::Context;
use clap::Parser;
use sample_auth::{
    api::routes::create_router,
    db::UserStoreProvider,
    utils::toml_config::{AppConfig, ConfigError},
    AppState,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sample-auth-server")]
#[command(author, version, about = "Sign-in and remember-me session server")]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "SAMPLE_AUTH_CONFIG", default_value = "sample-auth.toml")]
    config: PathBuf,

    /// Host to bind (overrides config)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Parsed before logging starts so `server.log_level` can seed the filter.
    let config_result = AppConfig::load(&cli.config);
    let default_level = match (&config_result, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.server.log_level.clone(),
        (Err(_), false) => "info".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match config_result {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(path)) => {
            warn!(path = %path.display(), "config file not found, using defaults");
            AppConfig::default()
        }
        Err(e) => return Err(e).with_context(|| format!("loading {}", cli.config.display())),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let provider = UserStoreProvider::from_url(&config.database.url);
    if let UserStoreProvider::SQLite { path } = &provider {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let users = provider
        .create_repository()
        .await
        .context("opening user store")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, users);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "sample-auth listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
