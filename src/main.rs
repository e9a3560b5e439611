use std::sync::Arc;

use anyhow::Context;
use clinic_chat_backend::{
    config::Config,
    routes,
    services::{
        gemini::GeminiClient, model::GenerativeModel, responder::Responder,
        worker_pool::BlockingPool,
    },
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    info!(?config, "configuration loaded");

    let model: Option<Arc<dyn GenerativeModel>> = match &config.gemini_api_key {
        Some(key) => Some(Arc::new(GeminiClient::new(
            key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.model_timeout,
        )) as Arc<dyn GenerativeModel>),
        None => {
            error!("GEMINI_API_KEY is not set; chat replies will report a configuration issue");
            None
        }
    };
    if config.chat_api_key.is_none() {
        error!("CHAT_API_KEY is not set; every chat request will be rejected");
    }

    let pool = BlockingPool::new(config.model_workers, config.model_timeout);
    let bind_addr = config.bind_addr;
    let state = AppState::new(config, Responder::new(model, pool)).shared();
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("chat widget backend listening on http://{bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
