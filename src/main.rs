//! Tally bot binary entrypoint wiring the Discord gateway, the JSON store, and the read API.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_bot::{
    bot,
    config::AppConfig,
    dao::{media::MediaLibrary, storage::JsonFileStore},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            warn!(error = %err, "failed to read .env file");
        }
    }

    let config = AppConfig::from_env().context("reading configuration")?;

    let media = MediaLibrary::new(&config.media_dir);
    if let Err(err) = media.ensure_dir() {
        warn!(dir = %config.media_dir.display(), error = %err, "could not create media directory");
    }
    let app_state = AppState::load(JsonFileStore::new(&config.data_file), media);

    match config.discord.clone() {
        Some(discord) => {
            let bot_state = app_state.clone();
            tokio::spawn(async move {
                if let Err(err) = bot::run(bot_state, discord).await {
                    error!(error = %err, "discord client stopped");
                }
            });
        }
        None => warn!("DISCORD_BOT_TOKEN not set; serving the HTTP API only"),
    }

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
