/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (HTTP layers, session gate on protected routes)
 * - Serve with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use session_gate::SessionGate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, services::sessions::MemorySessions, state::AppState};

fn init_tracing() {
    // RUST_LOG wins when set.
    // Ex: RUST_LOG=info,session_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting session gate demo in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    let sessions = Arc::new(MemorySessions::new());

    // Cookie first, then the header.
    let gate = SessionGate::new()
        .with_source(config.cookie_extractor())
        .with_source(config.header_extractor())
        .with_verifier(sessions.clone())
        .with_loader(sessions.clone());

    AppState::new(
        sessions,
        Arc::new(gate),
        config.session_cookie.clone(),
        config.body_limit_bytes,
    )
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config.body_limit_bytes)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
