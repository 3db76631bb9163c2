use clap::Parser;
use std::{env::current_dir, path::PathBuf, str::FromStr};
use tempo_error::{TempoError, TempoResult};
use tempo_models::{constants::DEFAULT_CONFIG_FILE_NAME, settings::Settings};
use tempo_utils::logger::Logger;
use tempo_web::TempoWebServer;
use tracing::{info, Level};

/// Tempo - project and timesheet tracking backend
///
/// A REST backend managing projects with dynamic attributes and the
/// timesheets reported against them, protected by bearer-token auth.
#[derive(Parser)]
#[command(name = "tempo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tempo backend", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, the server will look for 'tempo.toml'
    /// in the current working directory.
    #[arg(short, long, env = "TEMPO_CONFIG")]
    config: Option<PathBuf>,
}

/// Loads configuration, initializes logging and storage, starts the web
/// server and runs until a shutdown signal is received.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> TempoResult<()> {
    let cli = Cli::parse();

    // Determine the configuration file path
    // If not provided via CLI or environment variable, use default path
    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| TempoError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    let settings = Settings::new(config_path.to_string_lossy().to_string())?;

    let mut logger = Logger::new(Level::from_str(&settings.log.level).ok());
    logger.initialize()?;

    tempo_storage::init(&settings).await?;
    let server = TempoWebServer::init(&settings).await?;
    info!(
        host = %settings.web.host,
        port = settings.web.port,
        "Server started"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| TempoError::ShutdownError(format!("Failed to listen for ctrl-c: {e}")))?;
    info!("Shutdown signal received");

    server.stop().await?;
    tempo_storage::close().await?;
    Ok(())
}
