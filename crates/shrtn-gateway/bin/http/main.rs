mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use shrtn_core::{Partition, Repository, Shortener};
use shrtn_gateway::{telemetry, App, AppState};
use shrtn_generator::RandomAlphaGenerator;
use shrtn_shortener::{ShortenerService, UrlPolicy};
use shrtn_storage::{InMemoryRepository, MySqlRepository, TimeoutRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format.into());

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        partition = %config.partition,
        url_policy = %UrlPolicy::from(config.url_policy),
        store_timeout_ms = config.store_timeout_ms,
        "starting gateway server"
    );

    let shortener = match config.storage {
        StorageBackendArg::InMemory => build_shortener(InMemoryRepository::new(), &config),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository =
                MySqlRepository::connect(mysql_dsn, Partition::new(config.partition.as_str()))
                    .await
                    .context("failed to connect to mysql")?;
            repository
                .ensure_schema()
                .await
                .context("failed to create mysql schema")?;
            build_shortener(repository, &config)
        }
    };

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(shortener)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway server stopped");
    Ok(())
}

fn build_shortener<R: Repository>(repository: R, config: &CLI) -> Arc<dyn Shortener> {
    let repository =
        TimeoutRepository::new(repository, Duration::from_millis(config.store_timeout_ms));

    Arc::new(ShortenerService::with_policy(
        repository,
        RandomAlphaGenerator::new(),
        config.url_policy.into(),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
