//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use std::time::Duration;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::services::{self, AppStartTime};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server until it stops or Ctrl+C arrives.
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = get_config();
    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let store = startup.store.clone();
    let link_service = startup.link_service.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(services::configure)
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .workers(cpu_count)
    .disable_signals();

    let server = match server.bind(&bind_address) {
        Ok(server) => server,
        Err(e) => {
            lifetime::shutdown::perform_shutdown(&store, startup.lock).await;
            return Err(e).with_context(|| format!("Failed to bind {}", bind_address));
        }
    };
    warn!("Starting server at http://{}", bind_address);

    let server = server.run();
    let handle = server.handle();
    let mut server = std::pin::pin!(server);

    let result = tokio::select! {
        res = &mut server => res.context("HTTP server error"),
        _ = lifetime::shutdown::listen_for_shutdown() => {
            // 等待正在处理的请求完成
            handle.stop(true).await;
            server.await.context("HTTP server error")
        }
    };

    lifetime::shutdown::perform_shutdown(&store, startup.lock).await;
    warn!("Graceful shutdown: all tasks completed");

    result
}
