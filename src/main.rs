use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fiszki_backend::config::Config;
use fiszki_backend::services::trainer::SESSION_TTL;
use fiszki_backend::services::word_source::WordSource;
use fiszki_backend::state::AppState;
use fiszki_backend::{logging, routes, store, workers};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let store = store::from_config(&config);
    let word_source = Arc::new(WordSource::from_env());
    if !word_source.is_available() {
        tracing::warn!("GEMINI_API_KEY not set, word generation will serve the fallback lists");
    }

    let state = AppState::new(store, word_source);
    let trainer = state.trainer();

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let cleanup = workers::spawn_session_cleanup(trainer, SESSION_TTL);

    let addr = config.bind_addr();
    tracing::info!(%addr, "fiszki-backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped, initiating graceful shutdown sequence");
    cleanup.abort();
    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
