use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notion_herald::config::AppConfig;
use notion_herald::persistence::StateStore;
use notion_herald::server::{AppState, build_router};
use notion_herald::sink::DiscordSink;
use notion_herald::sleep::TokioSleeper;
use notion_herald::source::NotionClient;
use notion_herald::watcher::{Watcher, WatcherConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notion_herald=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let targets = config.targets();

    let source = NotionClient::new(
        config.notion_token.clone().unwrap_or_default(),
        config.poll.fetch_timeout,
    )
    .context("failed to build Notion client")?;
    let sink = DiscordSink::new(
        config.discord_token.clone().unwrap_or_default(),
        config.poll.send_timeout,
    )
    .context("failed to build Discord client")?;
    let store = StateStore::new(&config.state_file);

    let watcher = Watcher::new(
        source,
        sink,
        TokioSleeper,
        WatcherConfig {
            targets,
            poll: config.poll.clone(),
            ..Default::default()
        },
        store,
    );

    let shutdown = CancellationToken::new();
    let watcher_task = tokio::spawn(watcher.run(shutdown.clone()));

    let app = build_router(AppState::new(&config.state_file));
    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    info!("listening on {}", config.http_addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("Ctrl-C received, shutting down"),
                _ = server_shutdown.cancelled() => {}
            }
            server_shutdown.cancel();
        })
        .await
        .context("HTTP server failed")?;

    shutdown.cancel();
    if let Err(e) = watcher_task.await {
        error!(error = %e, "Watcher task panicked");
    }
    info!("Shut down cleanly");
    Ok(())
}
