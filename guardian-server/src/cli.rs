use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use guardian_core::Config;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{build_state, routes, spawn_config_reload_handler};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "guardian", version, about = "Weather API guardian gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to the TOML config file. Defaults to the platform config directory.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP gateway.
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Override `server.host`.
        #[arg(long)]
        host: Option<String>,

        /// Override `server.port`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate configuration (including the API key) and exit.
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { config, host, port } => serve(config.config, host, port).await,
            Command::Check { config } => {
                let cfg = Config::load(config.config.as_deref())?;
                cfg.require_api_key()?;
                info!(base_url = %cfg.weather_api.base_url, "Configuration OK");
                Ok(())
            }
        }
    }
}

async fn serve(source: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut cfg = Config::load(source.as_deref())?;
    if let Some(host) = host {
        cfg.server.host = host;
    }
    if let Some(port) = port {
        cfg.server.port = port;
    }

    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        base_url = %cfg.weather_api.base_url,
        "Configuration loaded"
    );

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);

    // Must fail before anything binds.
    let mut state = build_state(cfg, source)?;
    state.config = spawn_config_reload_handler(state.config);

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_overrides() {
        let cli = Cli::try_parse_from(["guardian", "serve", "--config", "/tmp/g.toml", "--port", "9000"]).unwrap();

        match cli.command {
            Command::Serve { config, host, port } => {
                assert_eq!(config.config, Some(PathBuf::from("/tmp/g.toml")));
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_check() {
        let cli = Cli::try_parse_from(["guardian", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check { config: ConfigArgs { config: None } }));
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["guardian", "serve", "--port", "99999"]).is_err());
    }
}
