use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use admin_api::config::{load_config, AppConfig, ConfigWatcher};
use admin_api::http::HttpServer;
use admin_api::lifecycle::{signals, Shutdown};
use admin_api::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the sole argument; defaults otherwise.
    let config_path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("admin-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_path = %config.dispatch.base_path,
        api_accept = %config.dispatch.api_accept,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Hot reload only applies when running from a file.
    let (config_updates, _watcher_guard) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        None => (mpsc::unbounded_channel().1, None),
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(async move {
        if let Err(e) = server.run(listener, config_updates, server_shutdown).await {
            tracing::error!("Server error: {}", e);
        }
    });

    signals::handle_signals(&shutdown).await;
    serve.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
