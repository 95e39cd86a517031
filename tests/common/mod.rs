//! Shared utilities for integration testing.

use std::time::Duration;

use tokio::sync::mpsc;

use admin_api::config::AppConfig;
use admin_api::http::HttpServer;
use admin_api::lifecycle::Shutdown;

/// Start a server on an ephemeral local port. Returns the base URL and the
/// shutdown handle (kept alive by the caller).
pub async fn start_server(config: AppConfig) -> (String, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (_, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    (format!("http://{}", addr), shutdown)
}

/// The configured activation header value.
pub fn api_accept() -> String {
    AppConfig::default().dispatch.api_accept
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client")
}
