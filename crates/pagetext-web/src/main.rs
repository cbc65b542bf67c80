use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pagetext_core::config_file;
use pagetext_web::{AppState, Overrides, Settings};
use tracing_subscriber::EnvFilter;

/// Serve the visible text of web pages over HTTP.
#[derive(Parser, Debug)]
#[command(name = "pagetext", version, about, long_about = None)]
struct Cli {
    /// Address to bind (env: PAGETEXT_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (env: PAGETEXT_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Outbound fetch timeout in seconds, 0 to disable (env: PAGETEXT_TIMEOUT)
    #[arg(long)]
    timeout: Option<u64>,

    /// Read this config file instead of the platform/CWD cascade
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let file = match &cli.config {
        Some(path) => config_file::load_from_path(path)
            .ok_or_else(|| anyhow::anyhow!("could not read config file {}", path.display()))?,
        None => config_file::load_config(),
    };

    let settings = Settings::resolve(
        Overrides {
            host: cli.host,
            port: cli.port,
            timeout_secs: cli.timeout,
        },
        &file,
        |key| std::env::var(key).ok(),
    );

    let state = Arc::new(AppState::new(&settings.fetch)?);
    let app = pagetext_web::router(state);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        timeout = ?settings.fetch.timeout,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(pagetext_web::shutdown_signal())
        .await?;

    Ok(())
}
